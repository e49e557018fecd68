#![cfg_attr(not(test), no_std)]

//! LS013B7DH05 (1.26" 144x168 Sharp Memory LCD) driver primitives.

mod framebuffer;
pub mod protocol;

#[cfg(feature = "embedded-graphics")]
mod graphics;

pub use framebuffer::FrameBuffer;

use core::convert::TryFrom;

use embedded_hal::{
    digital::OutputPin,
    spi::{Operation, SpiDevice},
};

/// VCOM inversion strategy.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VcomMode {
    /// VCOM driven via dedicated `EXTCOMIN` pin toggling (EXTMODE tied high).
    ExtComInPin,
    /// VCOM carried in the M1 bit of every serial command (EXTMODE tied low).
    SerialBit,
}

/// Driver configuration.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Config {
    /// Expected SPI clock in Hz (documented for board glue).
    pub spi_hz: u32,
    /// VCOM target frequency in Hz.
    pub vcom_hz: u8,
    /// VCOM strategy.
    pub vcom: VcomMode,
    /// Additional CS-active delay used for clear command hold time.
    pub clear_hold_ns: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            spi_hz: 1_000_000,
            vcom_hz: 1,
            vcom: VcomMode::ExtComInPin,
            clear_hold_ns: 160_000,
        }
    }
}

/// Driver errors.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Error<SpiErr, DispErr, ExtErr> {
    /// SPI transaction failed.
    Spi(SpiErr),
    /// DISP pin operation failed.
    Disp(DispErr),
    /// EXTCOMIN pin operation failed.
    ExtCom(ExtErr),
    /// Input parameters are outside supported bounds.
    InvalidInput,
}

pub type DriverResult<SpiErr, DispErr, ExtErr> = Result<(), Error<SpiErr, DispErr, ExtErr>>;

/// LS013B7DH05 driver.
#[derive(Debug)]
pub struct Ls013<SPI, DISP, EXTCOM> {
    spi: SPI,
    disp: DISP,
    extcom: EXTCOM,
    config: Config,
    vcom_high: bool,
}

impl<SPI, DISP, EXTCOM> Ls013<SPI, DISP, EXTCOM>
where
    SPI: SpiDevice<u8>,
    DISP: OutputPin,
    EXTCOM: OutputPin,
{
    /// Creates a new driver instance.
    pub fn new(spi: SPI, disp: DISP, extcom: EXTCOM, config: Config) -> Self {
        Self {
            spi,
            disp,
            extcom,
            config,
            vcom_high: false,
        }
    }

    /// Returns current configuration.
    pub fn config(&self) -> Config {
        self.config
    }

    /// Releases owned bus and pins.
    pub fn release(self) -> (SPI, DISP, EXTCOM) {
        (self.spi, self.disp, self.extcom)
    }

    /// Drives `DISP` high.
    pub fn enable_display(&mut self) -> DriverResult<SPI::Error, DISP::Error, EXTCOM::Error> {
        self.disp.set_high().map_err(Error::Disp)
    }

    /// Drives `DISP` low.
    pub fn disable_display(&mut self) -> DriverResult<SPI::Error, DISP::Error, EXTCOM::Error> {
        self.disp.set_low().map_err(Error::Disp)
    }

    /// Flips the VCOM polarity.
    ///
    /// Must be called at `vcom_hz`. In [`VcomMode::ExtComInPin`] the new level
    /// is driven immediately; in [`VcomMode::SerialBit`] it rides along with
    /// the next command.
    pub fn tick_vcom(&mut self) -> DriverResult<SPI::Error, DISP::Error, EXTCOM::Error> {
        self.vcom_high = !self.vcom_high;

        match self.config.vcom {
            VcomMode::SerialBit => Ok(()),
            VcomMode::ExtComInPin => {
                if self.vcom_high {
                    self.extcom.set_high().map_err(Error::ExtCom)
                } else {
                    self.extcom.set_low().map_err(Error::ExtCom)
                }
            }
        }
    }

    fn vcom_bit(&self) -> bool {
        match self.config.vcom {
            VcomMode::SerialBit => self.vcom_high,
            VcomMode::ExtComInPin => false,
        }
    }

    /// Issues the all-clear command.
    pub fn clear_all(&mut self) -> DriverResult<SPI::Error, DISP::Error, EXTCOM::Error> {
        let packet = protocol::clear_packet(self.vcom_bit());
        let mut ops = [
            Operation::Write(&packet),
            Operation::DelayNs(self.config.clear_hold_ns),
        ];
        self.spi.transaction(&mut ops).map_err(Error::Spi)
    }

    /// Writes one line (1..=168).
    pub fn write_line(
        &mut self,
        line: u16,
        pixels: &[u8; protocol::LINE_BYTES],
    ) -> DriverResult<SPI::Error, DISP::Error, EXTCOM::Error> {
        let packet =
            protocol::line_packet(line, pixels, self.vcom_bit()).ok_or(Error::InvalidInput)?;

        self.spi.write(&packet).map_err(Error::Spi)
    }

    /// Flushes a full framebuffer.
    pub fn flush_full(
        &mut self,
        buffer: &[u8; protocol::BUFFER_SIZE],
    ) -> DriverResult<SPI::Error, DISP::Error, EXTCOM::Error> {
        for (i, line) in buffer.chunks_exact(protocol::LINE_BYTES).enumerate() {
            let line =
                <&[u8; protocol::LINE_BYTES]>::try_from(line).map_err(|_| Error::InvalidInput)?;
            self.write_line((i + 1) as u16, line)?;
        }

        Ok(())
    }
}
