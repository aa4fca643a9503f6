//! `pyxis build-wheel` command

use anyhow::Result;

use pyxis::ops::Backend;

use crate::cli::BuildArgs;
use crate::commands::{config_settings, project_root};

pub fn execute(args: BuildArgs) -> Result<()> {
    let root = project_root(&args)?;
    let backend = Backend::new(&root)?;

    if args.plan {
        let (_, descriptors) = backend.plan()?;
        println!("{}", serde_json::to_string_pretty(&descriptors)?);
        return Ok(());
    }

    let settings = config_settings(&args);
    let name = backend.build_wheel(&args.out_dir, settings.as_ref(), None)?;
    println!("{}", name);

    Ok(())
}
