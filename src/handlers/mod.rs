// handlers/mod.rs - Handler modules by surface
//
// products:  open deletion endpoint (parity with the original contract)
// settings:  admin-token gated configuration endpoints

pub mod products;
pub mod settings;
