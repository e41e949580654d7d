use anyhow::Result;
use cavity_rs::Config;

fn main() -> Result<()> {
    let cfg = match std::env::args().nth(1) {
        Some(path) => Config::from_file(path)?,
        None => Config::new()?,
    };
    let bunch = cavity_rs::run(cfg)?;
    println!("done, {} of {} prtls alive", bunch.n_alive(), bunch.len());
    Ok(())
}
