use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::agent::Persona;
use crate::skin::SkinType;
use crate::tools::ToolKind;

const LOG_FILE: &str = "analyses.jsonl";

/// One line of the analysis log, written after every dispatch that reached
/// the model.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisLog {
    pub id: String,
    pub timestamp: String,
    pub persona: Persona,
    pub skin_type: SkinType,
    pub model: String,
    pub has_image: bool,
    pub question: String,
    pub tools_fired: Vec<ToolKind>,
    pub outcome: String,
    pub input_tokens: u32,
    pub output_tokens: u32,
    pub model_latency_ms: u64,
    pub total_latency_ms: u64,
}

impl AnalysisLog {
    pub fn summary(&self) -> String {
        format!(
            "Model: {} | Tools: {} | Model latency: {:.1}s | Total: {:.1}s | Tokens: {}",
            self.model,
            if self.tools_fired.is_empty() {
                "none".to_string()
            } else {
                self.tools_fired
                    .iter()
                    .map(|t| t.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            },
            self.model_latency_ms as f64 / 1000.0,
            self.total_latency_ms as f64 / 1000.0,
            self.input_tokens + self.output_tokens,
        )
    }
}

pub struct AnalysisLogger {
    dir: PathBuf,
}

impl AnalysisLogger {
    pub fn new(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir).context("Failed to create logs directory")?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    pub fn write(&self, entry: &AnalysisLog) -> Result<()> {
        let path = self.dir.join(LOG_FILE);
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .context("Failed to open log file")?;

        let json = serde_json::to_string(entry).context("Failed to serialize analysis log")?;
        writeln!(file, "{}", json).context("Failed to write log")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(outcome: &str) -> AnalysisLog {
        AnalysisLog {
            id: "run-1".into(),
            timestamp: "2026-01-01T00:00:00Z".into(),
            persona: Persona::DermatologistAi,
            skin_type: SkinType::Combination,
            model: "gpt-4o-mini".into(),
            has_image: false,
            question: "rosacea".into(),
            tools_fired: vec![ToolKind::Dermatologist],
            outcome: outcome.into(),
            input_tokens: 100,
            output_tokens: 50,
            model_latency_ms: 1200,
            total_latency_ms: 1300,
        }
    }

    #[test]
    fn test_write_appends_json_lines() {
        let dir = tempfile::tempdir().unwrap();
        let logger = AnalysisLogger::new(&dir.path().join("logs")).unwrap();

        logger.write(&entry("completed")).unwrap();
        logger.write(&entry("quota_exceeded")).unwrap();

        let contents = fs::read_to_string(dir.path().join("logs").join(LOG_FILE)).unwrap();
        let lines: Vec<serde_json::Value> = contents
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["persona"], "dermatologist_ai");
        assert_eq!(lines[0]["skin_type"], "combination");
        assert_eq!(lines[0]["tools_fired"][0], "dermatologist");
        assert_eq!(lines[1]["outcome"], "quota_exceeded");
    }

    #[test]
    fn test_summary() {
        let summary = entry("completed").summary();
        assert_eq!(
            summary,
            "Model: gpt-4o-mini | Tools: dermatologist | Model latency: 1.2s | Total: 1.3s | Tokens: 150"
        );
    }
}
