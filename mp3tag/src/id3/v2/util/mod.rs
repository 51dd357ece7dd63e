pub(crate) mod crc;
pub(crate) mod synchsafe;
pub(crate) mod upgrade;
