use crate::{
    bunch::{Bunch, CT, DELTA, X, XP, Y, YP},
    Config,
};
use anyhow::{Context, Result};

pub(crate) fn save_coord(
    bunch: &Bunch,
    dim: usize,
    name: &str,
    stride: usize,
    outdir: &str,
) -> Result<()> {
    npy::to_file(format!("{}/{}.npy", outdir, name), bunch.column(dim, stride))
        .context(format!("Could not save {} data to file", name))?;
    Ok(())
}

/// Writes a snapshot of the bunch every `output_interval` turns. Lost
/// particles are written too, as NaN.
pub(crate) fn save_bunch(t: u32, cfg: &Config, bunch: &Bunch) -> Result<()> {
    if t % cfg.output.output_interval == 0 {
        let output_prefix = format!(
            "{}/dat_{:05}",
            cfg.output.outdir,
            t / cfg.output.output_interval
        );
        std::fs::create_dir_all(&output_prefix).context("Unable to create output directory")?;
        println!("saving prtls");

        for (dim, name) in &[
            (X, "x"),
            (XP, "xp"),
            (Y, "y"),
            (YP, "yp"),
            (DELTA, "delta"),
            (CT, "ct"),
        ] {
            save_coord(bunch, *dim, name, cfg.output.stride, &output_prefix)?;
        }
    }

    Ok(())
}
