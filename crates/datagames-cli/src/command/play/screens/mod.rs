pub use self::{
    distribution::DistributionScreen, figure::FigureScreen, front_page::*,
    r_squared::RSquaredScreen,
};

mod distribution;
mod figure;
mod front_page;
mod r_squared;

#[cfg(test)]
mod test_util {
    use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
    use datagames_engine::{Seed, reveal::builtin_figures};

    use crate::command::play::GameConfig;

    pub fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    pub fn ctrl(ch: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL))
    }

    pub fn type_str(text: &str) -> impl Iterator<Item = Event> + '_ {
        text.chars().map(|ch| key(KeyCode::Char(ch)))
    }

    pub fn config() -> GameConfig {
        GameConfig {
            sample_seed: Seed::default(),
            regression_seed: Some(Seed::from_u64(11)),
            figures: builtin_figures(),
        }
    }
}
