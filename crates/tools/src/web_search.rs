//! Web search tool: SerpAPI, Google Custom Search, or Bing.
//!
//! Results are reduced to title/snippet/url triples and rendered as a
//! numbered list the model can quote from.

use async_trait::async_trait;
use minagent_config::SearchConfig;
use minagent_core::error::ToolError;
use minagent_core::tool::Tool;
use serde_json::Value;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchEngine {
    Serp,
    Google,
    Bing,
}

impl std::str::FromStr for SearchEngine {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "serp" => Ok(Self::Serp),
            "google" => Ok(Self::Google),
            "bing" => Ok(Self::Bing),
            other => Err(ToolError::NotConfigured(format!(
                "unsupported search engine '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub title: String,
    pub snippet: String,
    pub url: String,
}

pub struct WebSearchTool {
    engine: SearchEngine,
    api_key: String,
    google_cse_id: Option<String>,
    max_results: usize,
    client: reqwest::Client,
}

impl WebSearchTool {
    pub fn new(engine: SearchEngine, api_key: impl Into<String>, max_results: usize) -> Self {
        Self {
            engine,
            api_key: api_key.into(),
            google_cse_id: None,
            max_results,
            client: reqwest::Client::new(),
        }
    }

    /// Build from the `[search]` config section. Fails without an API key.
    pub fn from_config(config: &SearchConfig) -> Result<Self, ToolError> {
        let engine: SearchEngine = config.engine.parse()?;
        let api_key = config.api_key.clone().ok_or_else(|| {
            ToolError::NotConfigured(
                "search API key is required; set SEARCH_API_KEY or [search] api_key".into(),
            )
        })?;
        let mut tool = Self::new(engine, api_key, config.max_results);
        tool.google_cse_id = config.google_cse_id.clone();
        Ok(tool)
    }

    async fn fetch(&self, request: reqwest::RequestBuilder) -> Result<Value, ToolError> {
        let response = request
            .send()
            .await
            .map_err(|e| ToolError::Network(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(ToolError::Network(format!("search API returned {status}")));
        }
        response
            .json()
            .await
            .map_err(|e| ToolError::Network(format!("invalid search response: {e}")))
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, ToolError> {
        let n = self.max_results.to_string();
        let hits = match self.engine {
            SearchEngine::Serp => {
                let request = self.client.get("https://serpapi.com/search").query(&[
                    ("q", query),
                    ("api_key", self.api_key.as_str()),
                    ("engine", "google"),
                    ("num", n.as_str()),
                ]);
                parse_serp(&self.fetch(request).await?)
            }
            SearchEngine::Google => {
                let cse_id = self.google_cse_id.as_deref().ok_or_else(|| {
                    ToolError::NotConfigured("GOOGLE_CSE_ID is required for Google search".into())
                })?;
                let request = self
                    .client
                    .get("https://www.googleapis.com/customsearch/v1")
                    .query(&[
                        ("q", query),
                        ("key", self.api_key.as_str()),
                        ("cx", cse_id),
                        ("num", n.as_str()),
                    ]);
                parse_google(&self.fetch(request).await?)
            }
            SearchEngine::Bing => {
                let request = self
                    .client
                    .get("https://api.bing.microsoft.com/v7.0/search")
                    .header("Ocp-Apim-Subscription-Key", &self.api_key)
                    .query(&[
                        ("q", query),
                        ("count", n.as_str()),
                        ("responseFilter", "Webpages"),
                    ]);
                parse_bing(&self.fetch(request).await?)
            }
        };
        Ok(hits.into_iter().take(self.max_results).collect())
    }
}

#[async_trait]
impl Tool for WebSearchTool {
    fn name(&self) -> &str {
        "Web Search"
    }

    fn description(&self) -> &str {
        "Search the web for current information. Input should be a search query or \
         specific question. Results will include relevant snippets from web pages."
    }

    async fn run(&self, input: &str) -> Result<String, ToolError> {
        let query = input.trim();
        debug!(engine = ?self.engine, query, "Web search");
        let hits = self.search(query).await?;
        Ok(format_results(query, &hits))
    }
}

fn hits_from(items: Option<&Vec<Value>>, title: &str, url: &str) -> Vec<SearchHit> {
    let field = |item: &Value, key: &str, fallback: &str| {
        item[key].as_str().unwrap_or(fallback).to_string()
    };
    items
        .map(|items| {
            items
                .iter()
                .map(|item| SearchHit {
                    title: field(item, title, "No title"),
                    snippet: field(item, "snippet", "No snippet available"),
                    url: field(item, url, "#"),
                })
                .collect()
        })
        .unwrap_or_default()
}

pub fn parse_serp(body: &Value) -> Vec<SearchHit> {
    hits_from(body["organic_results"].as_array(), "title", "link")
}

pub fn parse_google(body: &Value) -> Vec<SearchHit> {
    hits_from(body["items"].as_array(), "title", "link")
}

pub fn parse_bing(body: &Value) -> Vec<SearchHit> {
    hits_from(body["webPages"]["value"].as_array(), "name", "url")
}

pub fn format_results(query: &str, hits: &[SearchHit]) -> String {
    if hits.is_empty() {
        return format!("No results found for query: {query}");
    }
    let mut output = format!("Search results for: {query}\n\n");
    for (i, hit) in hits.iter().enumerate() {
        output.push_str(&format!(
            "{}. {}\n   {}\n   URL: {}\n\n",
            i + 1,
            hit.title,
            hit.snippet,
            hit.url
        ));
    }
    output
}
