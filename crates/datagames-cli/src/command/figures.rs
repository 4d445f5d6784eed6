use std::path::PathBuf;

use datagames_engine::reveal::builtin_figures;

use crate::util::Output;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct FiguresArg {
    /// Output file path (stdout if omitted)
    #[clap(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &FiguresArg) -> anyhow::Result<()> {
    let FiguresArg { output } = arg;
    Output::save_json(&builtin_figures(), output.clone())
}
