// Core modules implementing the packing codec, table model, sweep driver,
// and error modeling.
pub mod codec;
pub mod error;
pub mod palette;
pub mod sweep;
pub mod table;
