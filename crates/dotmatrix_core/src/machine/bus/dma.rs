use super::map::OAM_START;
use super::MemoryBus;
use crate::machine::ppu::OAM_SIZE;

impl MemoryBus {
    /// OAM DMA: copy 160 bytes from `page << 8` into OAM.
    ///
    /// The transfer completes at once; the 160 M-cycle duration and the
    /// bus conflicts it causes on hardware are not modelled.
    pub(super) fn oam_dma(&mut self, page: u8) {
        let base = u16::from(page) << 8;
        for i in 0..OAM_SIZE as u16 {
            let byte = self.read_byte(base.wrapping_add(i));
            self.ppu.oam_write(i, byte);
        }
        self.dma = page;
        log::trace!("OAM DMA from 0x{base:04X} to 0x{OAM_START:04X}");
    }
}
