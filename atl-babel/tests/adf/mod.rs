//! ADF wire format tests

mod wire;
