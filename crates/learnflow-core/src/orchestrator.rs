//! Per-request orchestration: rate limit, dispatch, fallback policy.

use crate::admin::{AdminAuthorizer, AdminCommand, parse_command};
use crate::rate_limit::{Decision, RateLimiter};
use chrono::{DateTime, Utc};
use learnflow_config::RateLimitConfig;
use learnflow_context::{ComposeInput, PromptComposer, extract_query_facts, fallback_reply};
use learnflow_gateway::{GenerationOptions, TextGenerator};
use learnflow_protocol::{ChatMessage, ChatRequest, ScanReport};
use learnflow_tools::{DEFAULT_SEARCH_LIMIT, FileScanner, ResourceIndex, SearchProvider};
use log::{debug, info, warn};
use std::fmt::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use uuid::Uuid;

/// Characters of file content quoted per file in an analysis prompt.
const EXCERPT_CHARS: usize = 500;

/// Collaborators injected into the orchestrator at startup.
pub struct RelayServices {
    pub composer: PromptComposer,
    pub index: Arc<ResourceIndex>,
    pub generator: Arc<dyn TextGenerator>,
    pub search: Arc<dyn SearchProvider>,
    pub authorizer: Arc<dyn AdminAuthorizer>,
    pub scanner: FileScanner,
    pub generation: GenerationOptions,
    /// Default root for `/scan` without an explicit path.
    pub scan_root: PathBuf,
}

/// Terminal outcome of one request, already shaped for the HTTP layer.
#[derive(Debug)]
pub enum RelayOutcome {
    /// Assistant reply; covers success and every recovered-failure path.
    Reply(ChatMessage),
    /// Request budget exhausted for the caller's identity.
    Limited { reset_at: DateTime<Utc> },
}

/// Drives one chat request from rate-limit check to assistant reply.
///
/// Requests are independent; the only shared mutable state is the rate
/// limiter's bucket map. Upstream failures are always recovered into
/// assistant-shaped replies.
pub struct ChatOrchestrator {
    services: RelayServices,
    rate_limiter: RateLimiter,
}

impl ChatOrchestrator {
    /// Create an orchestrator over the injected services.
    pub fn new(services: RelayServices, rate_limit: &RateLimitConfig) -> Self {
        Self {
            services,
            rate_limiter: RateLimiter::new(rate_limit),
        }
    }

    /// Handle one validated chat request.
    ///
    /// `peer` is the caller's network address, used as the rate-limit and
    /// authorization identity when the request carries no `user_id`.
    pub async fn handle(&self, request: &ChatRequest, peer: &str) -> RelayOutcome {
        let identity = request.user_id.as_deref().unwrap_or(peer);
        let request_id = Uuid::new_v4();

        if let Decision::Limited { reset_at } = self.rate_limiter.check(identity) {
            warn!(
                "rate limited (request_id={}, identity={})",
                request_id, identity
            );
            return RelayOutcome::Limited { reset_at };
        }

        let Some(user_message) = request.latest_user_message() else {
            // The server validates request shape; this is a defensive path.
            warn!("request without user message (request_id={})", request_id);
            return RelayOutcome::Reply(ChatMessage::assistant(fallback_reply("")));
        };
        let query = user_message.content.trim();

        let reply = if let Some((command, path)) = parse_command(query) {
            info!(
                "admin command (request_id={}, command={})",
                request_id,
                command.as_str()
            );
            self.run_command(command, path, identity, request_id).await
        } else {
            self.run_chat(request, query, request_id).await
        };
        RelayOutcome::Reply(reply)
    }

    /// Ordinary chat: extract facts, gather context, compose, generate.
    async fn run_chat(&self, request: &ChatRequest, query: &str, request_id: Uuid) -> ChatMessage {
        let facts = extract_query_facts(query, self.services.composer.catalog());
        debug!(
            "query facts (request_id={}, course={:?}, semester={:?}, navigation={}, web={})",
            request_id,
            facts.course_code,
            facts.semester,
            facts.is_navigation_query,
            facts.needs_web_search
        );

        let search_results = self.services.index.search(query);
        let web_hits = if facts.needs_web_search {
            match self
                .services
                .search
                .search(query, DEFAULT_SEARCH_LIMIT)
                .await
            {
                Ok(hits) => hits,
                Err(err) => {
                    warn!(
                        "web search failed, omitting section (request_id={}, error={})",
                        request_id, err
                    );
                    Vec::new()
                }
            }
        } else {
            Vec::new()
        };

        let prompt = self.services.composer.compose(&ComposeInput {
            facts: &facts,
            query,
            conversation: &request.messages,
            search_results: &search_results,
            web_hits: &web_hits,
        });

        match self
            .services
            .generator
            .generate(&prompt, &self.services.generation)
            .await
        {
            Ok(text) => ChatMessage::assistant(text),
            Err(err) => {
                warn!(
                    "generation failed, serving fallback (request_id={}, error={})",
                    request_id, err
                );
                ChatMessage::assistant(fallback_reply(query))
            }
        }
    }

    /// Admin command: authorize, scan, then ask the model for a report.
    async fn run_command(
        &self,
        command: AdminCommand,
        path: Option<PathBuf>,
        identity: &str,
        request_id: Uuid,
    ) -> ChatMessage {
        if !self.services.authorizer.authorize(identity, command) {
            warn!(
                "admin command denied (request_id={}, identity={}, command={})",
                request_id,
                identity,
                command.as_str()
            );
            return ChatMessage::assistant(
                "You are not authorized to run admin commands on this deployment.",
            );
        }

        let root = path.unwrap_or_else(|| self.services.scan_root.clone());
        let report = match self.services.scanner.scan(&root, None) {
            Ok(report) => report,
            Err(err) => {
                warn!(
                    "scan failed (request_id={}, root={}, error={})",
                    request_id,
                    root.display(),
                    err
                );
                return ChatMessage::assistant(format!(
                    "Scan Error: could not scan `{}`: {}",
                    root.display(),
                    err
                ));
            }
        };

        if report.files.is_empty() {
            return ChatMessage::assistant(format!(
                "Scan of `{}` found no files.",
                root.display()
            ));
        }

        let prompt = analysis_prompt(command, &root, &report);
        match self
            .services
            .generator
            .generate(&prompt, &self.services.generation)
            .await
        {
            Ok(text) => ChatMessage::assistant(text),
            Err(err) => {
                warn!(
                    "analysis generation failed, serving listing (request_id={}, error={})",
                    request_id, err
                );
                ChatMessage::assistant(plain_listing(&root, &report))
            }
        }
    }
}

/// Fixed analysis prompt: file metadata plus a bounded excerpt per file.
fn analysis_prompt(command: AdminCommand, root: &Path, report: &ScanReport) -> String {
    let intent = match command {
        AdminCommand::Scan => {
            "Write a short code-review style report: purpose of the tree, notable files, and \
anything that looks unfinished."
        }
        AdminCommand::Debug => {
            "Write a short diagnostic report: likely bugs, suspicious patterns, and files worth \
a closer look."
        }
    };

    let mut prompt = format!(
        "You are reviewing local project files for an administrator.\n{}\n\nScanned {} files \
under `{}`:",
        intent,
        report.files.len(),
        root.display()
    );
    for file in &report.files {
        let excerpt: String = file.content.chars().take(EXCERPT_CHARS).collect();
        let _ = write!(
            prompt,
            "\n\n## {} ({} lines, {} bytes)\n{}",
            file.path, file.line_count, file.size_bytes, excerpt
        );
    }
    if report.truncated {
        prompt.push_str("\n\n(The file list was truncated at the scan cap.)");
    }
    prompt
}

/// Fallback body when the model is unavailable: a plain file listing.
fn plain_listing(root: &Path, report: &ScanReport) -> String {
    let mut listing = format!(
        "Scanned {} files under `{}` (analysis service unavailable):",
        report.files.len(),
        root.display()
    );
    for file in &report.files {
        let _ = write!(listing, "\n- {} ({} lines)", file.path, file.line_count);
    }
    if report.truncated {
        listing.push_str("\n(list truncated at the scan cap)");
    }
    listing
}
