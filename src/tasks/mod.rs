//! Background Tasks Module

mod cleanup;

pub(crate) use cleanup::spawn_sweep_task;
