// Licensed under the Apache-2.0 license

use anyhow::Result;

use crate::{cargo, run_command, select_packages};

pub fn run(release: bool, packages: &[String]) -> Result<()> {
    let mut cmd = cargo(&["build", "--all-targets"]);
    if release {
        cmd.arg("--release");
    }
    select_packages(&mut cmd, packages);
    run_command("cargo build", &mut cmd)
}
