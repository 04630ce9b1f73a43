use core::fmt::Debug;

/// Single-channel analog input returning the raw conversion result.
pub trait AnalogInput {
    type Error: Debug;

    fn read(&mut self) -> Result<u16, Self::Error>;
}
