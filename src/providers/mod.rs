pub mod rom_exchange;

pub use rom_exchange::RomExchangeProvider;
