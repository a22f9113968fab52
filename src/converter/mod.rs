//! Topology resolver: closed-form steady-state sizing.
//!
//! Both topologies use the standard first-order approximations in
//! continuous conduction mode:
//!
//! | | Buck | Boost |
//! |---|---|---|
//! | D | Vo/Vin | (Vo-Vin)/Vo |
//! | IL_avg | Iload | Pin/Vin |
//! | L | (Vin-Vo)·D / (ΔIL·fsw) | Vin·D / (ΔIL·fsw) |
//! | C | ΔIL / (8·fsw·ΔVo) | Iload·D / (fsw·ΔVo) |
//!
//! with ΔIL = IL_avg·ripple% and ΔVo = Vo·vripple%. ESR, switching losses
//! and discontinuous conduction are not modeled.

mod resolver;

pub use resolver::{resolve, ElectricalResult};
