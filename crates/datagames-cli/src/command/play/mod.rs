use datagames_engine::{
    DistributionCatalog, GuessDistributionEngine, RegressionDataGenerator, RegressionGame, Seed,
    reveal::{Figure, RevealStateMachine, builtin_figures},
};
use datagames_tui::{Runtime, Screen, ScreenStack};

use self::screens::{FrontPageScreen, Game};
use crate::{command::GlobalArgs, util};

mod screens;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Open a game directly instead of the front page
    #[clap(long, value_enum)]
    game: Option<Game>,
}

/// Settings every game screen is created from.
#[derive(Debug, Clone)]
pub(crate) struct GameConfig {
    sample_seed: Seed,
    regression_seed: Option<Seed>,
    figures: Vec<Figure>,
}

impl GameConfig {
    fn distribution_engine(&self) -> GuessDistributionEngine {
        GuessDistributionEngine::new(DistributionCatalog::new(self.sample_seed))
    }

    fn regression_game(&self) -> RegressionGame {
        let generator = self
            .regression_seed
            .map_or_else(RegressionDataGenerator::new, RegressionDataGenerator::with_seed);
        RegressionGame::new(generator)
    }

    fn reveal_machine(&self) -> RevealStateMachine {
        RevealStateMachine::new(self.figures.clone())
    }
}

pub(crate) fn run(global: &GlobalArgs, arg: &PlayArg) -> anyhow::Result<()> {
    let figures = match &global.figures {
        Some(path) => util::read_figures_file(path)?,
        None => builtin_figures(),
    };
    let config = GameConfig {
        sample_seed: global.sample_seed(),
        regression_seed: global.seed,
        figures,
    };
    tracing::info!(
        seed = %config.sample_seed,
        figures = config.figures.len(),
        "starting terminal UI"
    );

    let initial: Box<dyn Screen> = match arg.game {
        Some(game) => game.open(&config),
        None => Box::new(FrontPageScreen::new(config)),
    };
    let mut app = ScreenStack::new(initial);
    Runtime::new().run(&mut app)?;
    Ok(())
}
