use std::{
    fs::File,
    io::{self, BufWriter, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;
use datagames_engine::reveal::Figure;

#[derive(Debug)]
pub enum Output {
    Stdout {
        writer: StdoutLock<'static>,
    },
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    pub fn save_json<T>(value: &T, output_path: Option<PathBuf>) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = Output::from_output_path(output_path)?;
        output.write_json(value)?;
        tracing::info!(output = %output.display_path(), "wrote JSON output");
        Ok(())
    }

    pub fn from_output_path(output_path: Option<PathBuf>) -> anyhow::Result<Self> {
        match output_path {
            Some(path) => Output::open(path),
            None => Ok(Output::stdout()),
        }
    }

    pub fn stdout() -> Self {
        Output::Stdout {
            writer: io::stdout().lock(),
        }
    }

    pub fn open(path: PathBuf) -> anyhow::Result<Self> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    pub fn display_path(&self) -> String {
        match self {
            Output::Stdout { .. } => "stdout".to_string(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    pub fn write_json<T>(&mut self, value: T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut *self, &value)
            .with_context(|| format!("Failed to write JSON to {}", self.display_path()))?;
        writeln!(&mut *self).with_context(|| {
            format!(
                "Failed to write newline after JSON to {}",
                self.display_path()
            )
        })?;
        self.flush()
            .with_context(|| format!("Failed to flush output to {}", self.display_path()))?;
        Ok(())
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout { writer } => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout { writer } => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    let reader = io::BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;

    Ok(value)
}

/// Reads a figure set for the figure game.
///
/// The file holds a JSON array of figures, in the format printed by
/// `datagames figures`. An empty array is rejected since the game needs at
/// least one figure to reveal.
pub fn read_figures_file<P>(path: P) -> anyhow::Result<Vec<Figure>>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let figures: Vec<Figure> = read_json_file("figures", path)?;
    anyhow::ensure!(
        !figures.is_empty(),
        "figures file contains no figures: {}",
        path.display()
    );
    Ok(figures)
}

#[cfg(test)]
mod tests {
    use std::{env, fs, process};

    use datagames_engine::reveal::builtin_figures;

    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        env::temp_dir().join(format!("datagames-{}-{name}", process::id()))
    }

    #[test]
    fn test_figures_file_round_trip() {
        let path = temp_path("figures.json");
        Output::save_json(&builtin_figures(), Some(path.clone())).unwrap();
        let figures = read_figures_file(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(figures, builtin_figures());
    }

    #[test]
    fn test_empty_figures_file_is_rejected() {
        let path = temp_path("empty.json");
        fs::write(&path, "[]").unwrap();
        let result = read_figures_file(&path);
        fs::remove_file(&path).unwrap();
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file_reports_path() {
        let path = temp_path("missing.json");
        let err = read_figures_file(&path).unwrap_err();
        assert!(err.to_string().contains("missing.json"));
    }
}
