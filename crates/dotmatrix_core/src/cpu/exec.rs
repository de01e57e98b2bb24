//! Primary-table instruction handlers.
//!
//! Every handler has the `Handler` signature from `table.rs`: it receives
//! the opcode byte that selected it (so one handler can serve a whole
//! opcode group), performs the instruction's effects, and returns the
//! official cost in clock ticks.

mod alu;
mod control;
mod incdec;
mod ld;
mod stack;
mod system;
