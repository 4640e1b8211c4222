//! Caller-facing outreach operations.

use std::sync::Arc;

use class_gateway::{token_prefix, GatewayClient, ParamMap};
use database::ParamScope;
use tracing::info;

use crate::config::PipelineConfig;
use crate::dedup::dedupe;
use crate::discovery::ClassDiscovery;
use crate::dispatch::{MessageDispatcher, CONTENT_KEY};
use crate::error::{OutreachError, Result, ValidationError};
use crate::filter::filter_classes;
use crate::models::{Candidates, DiscoveryReport, DispatchRequest, FilterCriteria, StudentRecord};
use crate::roster::RosterFetcher;
use crate::store::ConfigResolver;

/// Discovery-filter-dispatch pipeline for one backend.
///
/// Every call acquires its own access token; nothing is shared between runs
/// except the configuration store.
#[derive(Clone)]
pub struct OutreachPipeline {
    client: GatewayClient,
    config: PipelineConfig,
    store: Arc<dyn ConfigResolver>,
}

impl OutreachPipeline {
    pub fn new(client: GatewayClient, config: PipelineConfig, store: Arc<dyn ConfigResolver>) -> Self {
        Self {
            client,
            config,
            store,
        }
    }

    /// Find not-yet-connected students in the teacher's classes matching
    /// `grades` and `dates`.
    ///
    /// Input is validated before any request. Only token acquisition can
    /// fail the run; failed pages and rosters are logged and skipped.
    pub async fn discover_candidates<G, D>(
        &self,
        teacher_id: &str,
        grades: &[G],
        dates: &[D],
    ) -> Result<Candidates>
    where
        G: AsRef<str>,
        D: AsRef<str>,
    {
        require_teacher(teacher_id)?;
        let criteria = FilterCriteria::new(grades, dates)?;
        info!(
            teacher = %teacher_id,
            grades = ?criteria.grades(),
            dates = ?criteria.dates(),
            "Discovering candidates"
        );

        let gateway_params = self.store.get(teacher_id, ParamScope::Gateway).await?;
        let roster_params = self.store.get(teacher_id, ParamScope::Roster).await?;
        let token = self.token().await?;

        let classes = ClassDiscovery::new(&self.client, &self.config)
            .list_classes(&token, &gateway_params)
            .await;
        let targets = filter_classes(&classes, &criteria, &self.config.course_keyword);
        info!(matched = targets.len(), total = classes.len(), "Class filtering complete");

        let report = DiscoveryReport {
            total_classes_found: classes.len(),
            filtered_classes_count: targets.len(),
            filtered_classes: targets.iter().map(|t| t.class_name.clone()).collect(),
            selected_grade: criteria.grades().to_vec(),
            selected_time: criteria.dates().to_vec(),
        };

        if targets.is_empty() {
            return Ok(Candidates {
                classes: Vec::new(),
                students: Vec::new(),
                report,
                message: Some("no classes matched the selected grades and dates".to_string()),
            });
        }

        let user_id = user_id(&gateway_params);
        let pending = RosterFetcher::new(&self.client, &self.config)
            .collect_not_connected(&targets, &token, user_id, &roster_params)
            .await;
        let students = dedupe(pending);

        info!(
            classes = targets.len(),
            students = students.len(),
            "Candidate discovery complete"
        );

        Ok(Candidates {
            classes: targets,
            students,
            report,
            message: None,
        })
    }

    /// Broadcast `message` to `students`. Returns the number of recipients.
    pub async fn dispatch(
        &self,
        teacher_id: &str,
        message: &str,
        students: Vec<StudentRecord>,
    ) -> Result<usize> {
        require_teacher(teacher_id)?;
        let request = DispatchRequest::new(message, students)?;
        let token = self.token().await?;

        MessageDispatcher::new(&self.client, self.store.as_ref())
            .send(teacher_id, &request, &token)
            .await
    }

    /// The last successfully sent message, or an empty string.
    pub async fn default_message(&self, teacher_id: &str) -> Result<String> {
        require_teacher(teacher_id)?;
        let send = self.store.get(teacher_id, ParamScope::Send).await?;
        Ok(send.get(CONTENT_KEY).cloned().unwrap_or_default())
    }

    /// Replace one of the teacher's parameter tables.
    pub async fn put_params(&self, teacher_id: &str, scope: ParamScope, table: &ParamMap) -> Result<()> {
        require_teacher(teacher_id)?;
        self.store.replace(teacher_id, scope, table).await?;
        Ok(())
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    async fn token(&self) -> Result<String> {
        let token = self.client.acquire_token().await.map_err(OutreachError::Auth)?;
        info!(token = %token_prefix(&token), "Access token acquired");
        Ok(token)
    }
}

impl std::fmt::Debug for OutreachPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutreachPipeline")
            .field("client", &self.client)
            .field("config", &self.config)
            .finish()
    }
}

fn require_teacher(teacher_id: &str) -> std::result::Result<(), ValidationError> {
    if teacher_id.trim().is_empty() {
        return Err(ValidationError::EmptyTeacher);
    }
    Ok(())
}

fn user_id(gateway_params: &ParamMap) -> &str {
    gateway_params.get("userId").map(String::as_str).unwrap_or("")
}
