// crates/vtisnap-cli/src/cmd/command.rs

use clap::Args;
use vtisnap_core::command::SnapshotCommand;

#[derive(Args, Debug)]
pub struct CommandArgs {
    /// xs ys zs xf yf zf dx dy dz time filename (metres; time as iteration or seconds)
    #[arg(required = true, num_args = 11, value_names = ["XS", "YS", "ZS", "XF", "YF", "ZF", "DX", "DY", "DZ", "TIME", "FILENAME"], allow_hyphen_values = true)]
    pub params: Vec<String>,
}

pub fn run(args: CommandArgs) -> anyhow::Result<()> {
    let line = format!("{} {}", vtisnap_core::command::TAG, args.params.join(" "));
    let cmd = SnapshotCommand::parse(&line)?;
    println!("{cmd}");
    Ok(())
}
