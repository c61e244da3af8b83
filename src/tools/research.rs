use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";
const PUBMED_WEB_URL: &str = "https://pubmed.ncbi.nlm.nih.gov/";

const SEARCH_TIMEOUT: Duration = Duration::from_secs(15);
const SUMMARY_TIMEOUT: Duration = Duration::from_secs(10);
const MAX_RESULTS: usize = 5;
const SUMMARIZED_PAPERS: usize = 3;
const TITLE_LIMIT: usize = 100;
const DOMAIN_QUALIFIER: &str = "AND (dermatology OR skin OR skincare)";

#[derive(Debug, Clone, PartialEq)]
pub struct Paper {
    pub id: String,
    pub title: String,
}

/// Outcome of a literature search. Only `Found` means titles were retrieved;
/// `IdsOnly` is a search hit whose summary request failed or returned none of
/// the requested ids.
#[derive(Debug, Clone, PartialEq)]
pub enum ResearchOutcome {
    Found {
        topic: String,
        count: u64,
        papers: Vec<Paper>,
    },
    IdsOnly {
        topic: String,
        count: u64,
        ids: Vec<String>,
    },
    NoResults {
        topic: String,
    },
    Unreachable {
        reason: String,
    },
    Malformed {
        reason: String,
    },
}

impl ResearchOutcome {
    pub fn render(&self) -> String {
        match self {
            ResearchOutcome::Found {
                topic,
                count,
                papers,
            } => {
                let list = papers
                    .iter()
                    .map(|p| format!("- {}", p.title))
                    .collect::<Vec<_>>()
                    .join("\n");
                format!(
                    "**Found {} research papers** on '{}' related to dermatology:\n\n{}\n\n[View all results on PubMed]({})",
                    count,
                    topic,
                    list,
                    pubmed_link(topic)
                )
            }
            ResearchOutcome::IdsOnly { topic, count, ids } => format!(
                "Found {} research papers on '{}' in dermatology (summaries unavailable). PubMed IDs: {}",
                count,
                topic,
                ids.join(", ")
            ),
            ResearchOutcome::NoResults { topic } => format!(
                "No specific research papers found for '{}' in dermatology databases. Try more general terms like 'acne treatment' or 'skin aging'.",
                topic
            ),
            ResearchOutcome::Unreachable { .. } => {
                "Unable to connect to PubMed research database. Please check your internet connection."
                    .to_string()
            }
            ResearchOutcome::Malformed { reason } => format!(
                "Research search temporarily unavailable. Error: {}",
                truncate_chars(reason, TITLE_LIMIT)
            ),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ResearchOutcome::Found { .. } => "found",
            ResearchOutcome::IdsOnly { .. } => "ids_only",
            ResearchOutcome::NoResults { .. } => "no_results",
            ResearchOutcome::Unreachable { .. } => "unreachable",
            ResearchOutcome::Malformed { .. } => "malformed",
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    esearchresult: SearchResult,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    count: Option<String>,
    #[serde(default)]
    idlist: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ResearchClient {
    client: reqwest::Client,
    base_url: String,
}

impl ResearchClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn search(&self, topic: &str) -> ResearchOutcome {
        let topic = topic.trim().to_string();
        let term = format!("{} {}", topic, DOMAIN_QUALIFIER);
        let retmax = MAX_RESULTS.to_string();

        let response = match self
            .client
            .get(format!("{}/esearch.fcgi", self.base_url))
            .query(&[
                ("db", "pubmed"),
                ("term", term.as_str()),
                ("retmode", "json"),
                ("retmax", retmax.as_str()),
                ("sort", "relevance"),
            ])
            .timeout(SEARCH_TIMEOUT)
            .send()
            .await
            .and_then(|r| r.error_for_status())
        {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "PubMed search request failed");
                return ResearchOutcome::Unreachable {
                    reason: e.to_string(),
                };
            }
        };

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                return ResearchOutcome::Unreachable {
                    reason: e.to_string(),
                }
            }
        };

        let result = match serde_json::from_str::<SearchEnvelope>(&body) {
            Ok(envelope) => envelope.esearchresult,
            Err(e) => {
                warn!(error = %e, "PubMed search returned an unexpected payload");
                return ResearchOutcome::Malformed {
                    reason: e.to_string(),
                };
            }
        };

        let ids: Vec<String> = result.idlist.into_iter().take(MAX_RESULTS).collect();
        if ids.is_empty() {
            return ResearchOutcome::NoResults { topic };
        }
        let count = result
            .count
            .and_then(|c| c.parse().ok())
            .unwrap_or(ids.len() as u64);

        match self.fetch_titles(&ids[..ids.len().min(SUMMARIZED_PAPERS)]).await {
            Ok(papers) if papers.is_empty() => {
                warn!("PubMed summary had none of the requested ids; listing ids only");
                ResearchOutcome::IdsOnly { topic, count, ids }
            }
            Ok(papers) => {
                debug!(count, papers = papers.len(), "PubMed search complete");
                ResearchOutcome::Found {
                    topic,
                    count,
                    papers,
                }
            }
            Err(e) => {
                warn!(error = %e, "PubMed summary request failed; listing ids only");
                ResearchOutcome::IdsOnly { topic, count, ids }
            }
        }
    }

    async fn fetch_titles(&self, ids: &[String]) -> anyhow::Result<Vec<Paper>> {
        let joined = ids.join(",");
        let summary: serde_json::Value = self
            .client
            .get(format!("{}/esummary.fcgi", self.base_url))
            .query(&[("db", "pubmed"), ("id", joined.as_str()), ("retmode", "json")])
            .timeout(SUMMARY_TIMEOUT)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let papers = ids
            .iter()
            .filter_map(|id| {
                let entry = summary.get("result")?.get(id)?;
                let title = entry
                    .get("title")
                    .and_then(|t| t.as_str())
                    .unwrap_or("No title available");
                Some(Paper {
                    id: id.clone(),
                    title: truncate_chars(title, TITLE_LIMIT),
                })
            })
            .collect();

        Ok(papers)
    }
}

fn truncate_chars(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max_chars).collect();
        out.push_str("...");
        out
    }
}

fn pubmed_link(topic: &str) -> String {
    let term = format!("{} {}", topic, DOMAIN_QUALIFIER);
    match reqwest::Url::parse_with_params(PUBMED_WEB_URL, &[("term", term.as_str())]) {
        Ok(url) => url.to_string(),
        Err(_) => PUBMED_WEB_URL.to_string(),
    }
}
