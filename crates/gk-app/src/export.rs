//! Trajectory and report export.

use std::io::Write;

use gk_sim::Trajectory;
use serde::Serialize;

use crate::error::AppResult;

/// CSV with a `t,x,v,u,energy` header, one row per sample.
pub fn write_csv<W: Write>(traj: &Trajectory, mut out: W) -> AppResult<()> {
    writeln!(out, "t,x,v,u,energy")?;
    for s in traj.samples() {
        writeln!(out, "{},{},{},{},{}", s.t, s.x, s.v, s.u, s.energy)?;
    }
    out.flush()?;
    Ok(())
}

/// Pretty-printed JSON of any serializable value.
pub fn write_json<W: Write, T: Serialize + ?Sized>(value: &T, mut out: W) -> AppResult<()> {
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}
