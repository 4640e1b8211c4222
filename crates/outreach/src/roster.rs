//! Per-class roster retrieval.

use std::collections::HashSet;
use std::time::Duration;

use class_gateway::{GatewayClient, GatewayError, ParamMap, RosterEntry};
use rand::Rng;
use tracing::{info, warn};

use crate::config::PipelineConfig;
use crate::merge::{enforce_pinned, merge_params, param_map, ROSTER_PROTECTED};
use crate::models::{StudentRecord, TargetClass};

/// Fetches class rosters one at a time, pacing requests and isolating
/// failures to the class that caused them.
pub struct RosterFetcher<'a> {
    client: &'a GatewayClient,
    config: &'a PipelineConfig,
}

impl<'a> RosterFetcher<'a> {
    pub fn new(client: &'a GatewayClient, config: &'a PipelineConfig) -> Self {
        Self { client, config }
    }

    /// Query parameters for one roster request, with teacher configuration
    /// applied and `classCode` verified afterwards.
    pub fn roster_query(
        &self,
        class_code: &str,
        token: &str,
        user_id: &str,
        roster_params: &ParamMap,
    ) -> ParamMap {
        let defaults = param_map([
            ("appId", self.client.config().app_id.as_str()),
            ("appVersion", ""),
            ("accessToken", token),
            ("userId", user_id),
            ("classCode", class_code),
            ("schoolId", "3"),
            ("classGroupCode", ""),
            ("chatId", ""),
        ]);

        let mut query = merge_params(&defaults, roster_params, ROSTER_PROTECTED);
        if enforce_pinned(&mut query, "classCode", class_code) {
            warn!(class_code, "classCode drifted during merge and was restored");
        }
        query
    }

    /// Fetch the full roster of one class, every connection status included.
    pub async fn fetch_roster(
        &self,
        target: &TargetClass,
        token: &str,
        user_id: &str,
        roster_params: &ParamMap,
    ) -> Result<Vec<StudentRecord>, GatewayError> {
        let query = self.roster_query(&target.class_code, token, user_id, roster_params);
        let headers = merge_params(
            &self.client.config().roster_headers(),
            roster_params,
            ROSTER_PROTECTED,
        );

        let entries = self
            .client
            .student_list(&query, &headers, self.config.roster_timeout)
            .await?;

        Ok(roster_records(entries, target))
    }

    /// Collect not-yet-connected students of every target class, in order.
    ///
    /// A class whose roster cannot be fetched contributes no students; the
    /// remaining classes are still processed.
    pub async fn collect_not_connected(
        &self,
        targets: &[TargetClass],
        token: &str,
        user_id: &str,
        roster_params: &ParamMap,
    ) -> Vec<StudentRecord> {
        let mut students = Vec::new();

        for target in targets {
            tokio::time::sleep(self.pacing_delay()).await;

            let roster = match self.fetch_roster(target, token, user_id, roster_params).await {
                Ok(roster) => roster,
                Err(e) => {
                    warn!(
                        class = %target.class_name,
                        class_code = %target.class_code,
                        transport = e.is_transport(),
                        error = %e,
                        "Roster fetch failed, skipping class"
                    );
                    continue;
                }
            };

            let total = roster.len();
            let pending = not_connected(roster, self.config.connected_status);
            warn_on_duplicates(target, &pending);

            info!(
                class = %target.class_name,
                class_code = %target.class_code,
                total,
                not_connected = pending.len(),
                connected = total - pending.len(),
                "Roster processed"
            );
            students.extend(pending);
        }

        students
    }

    /// Random delay drawn uniformly from the configured pacing range.
    fn pacing_delay(&self) -> Duration {
        let min = self.config.pacing_min.as_millis() as u64;
        let max = self.config.pacing_max.as_millis() as u64;
        if max <= min {
            return Duration::from_millis(min);
        }
        Duration::from_millis(rand::thread_rng().gen_range(min..=max))
    }
}

/// Convert raw roster entries into student records for `target`.
///
/// A missing name becomes `学生<n>` (1-based position), a missing status `0`.
pub fn roster_records(entries: Vec<RosterEntry>, target: &TargetClass) -> Vec<StudentRecord> {
    entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| StudentRecord {
            student_code: entry.student_code.unwrap_or_default(),
            student_name: entry
                .student_name
                .unwrap_or_else(|| format!("学生{}", i + 1)),
            class_code: target.class_code.clone(),
            class_name: target.class_name.clone(),
            connection_status: entry.friend.unwrap_or(0),
        })
        .collect()
}

/// Keep students whose status is anything but the connected sentinel.
pub fn not_connected(students: Vec<StudentRecord>, connected_status: i64) -> Vec<StudentRecord> {
    students
        .into_iter()
        .filter(|s| s.connection_status != connected_status)
        .collect()
}

fn warn_on_duplicates(target: &TargetClass, students: &[StudentRecord]) {
    let mut codes = HashSet::new();
    let duplicates = students
        .iter()
        .filter(|s| !codes.insert(s.student_code.as_str()))
        .count();
    if duplicates > 0 {
        warn!(
            class_code = %target.class_code,
            duplicates,
            "Roster repeats student codes"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CONNECTED;

    fn target() -> TargetClass {
        TargetClass {
            class_code: "A".to_string(),
            class_name: "暑假一年级".to_string(),
        }
    }

    fn entry(code: &str, name: Option<&str>, friend: Option<i64>) -> RosterEntry {
        RosterEntry {
            student_code: Some(code.to_string()),
            student_name: name.map(str::to_string),
            friend,
        }
    }

    #[test]
    fn keeps_only_unconnected_in_order() {
        let entries = vec![
            entry("S1", Some("张三"), Some(0)),
            entry("S2", Some("李四"), Some(1)),
            entry("S3", Some("王五"), Some(0)),
        ];

        let pending = not_connected(roster_records(entries, &target()), CONNECTED);
        let codes: Vec<_> = pending.iter().map(|s| s.student_code.as_str()).collect();
        assert_eq!(codes, ["S1", "S3"]);
        assert!(pending.iter().all(|s| s.class_code == "A"));
    }

    #[test]
    fn any_non_sentinel_status_counts_as_unconnected() {
        let entries = vec![entry("S1", None, None), entry("S2", None, Some(2))];
        let pending = not_connected(roster_records(entries, &target()), CONNECTED);
        assert_eq!(pending.len(), 2);
        assert_eq!(pending[0].student_name, "学生1");
        assert_eq!(pending[0].connection_status, 0);
        assert_eq!(pending[1].student_name, "学生2");
    }

    #[test]
    fn mixed_type_roster_keeps_every_student() {
        let data: class_gateway::RosterData = serde_json::from_str(
            r#"{"studentList": [
                {"studentCode": "S1", "studentName": "张三", "friend": 0},
                {"studentCode": 12345, "studentName": null, "friend": "0"},
                {"studentCode": "S3", "studentName": "王五", "friend": "1"},
                {"studentCode": "S4", "studentName": "赵六", "friend": "unknown"}
            ]}"#,
        )
        .unwrap();
        let entries = data.student_list.unwrap();

        let pending = not_connected(roster_records(entries, &target()), CONNECTED);
        let codes: Vec<_> = pending.iter().map(|s| s.student_code.as_str()).collect();
        assert_eq!(codes, ["S1", "12345", "S4"]);
        assert_eq!(pending[1].student_name, "学生2");
        assert_eq!(pending[2].connection_status, 0);
    }

    #[test]
    fn roster_query_pins_class_code() {
        let client = GatewayClient::new(class_gateway::GatewayConfig::default()).unwrap();
        let config = PipelineConfig::default();
        let fetcher = RosterFetcher::new(&client, &config);

        let overrides = param_map([
            ("classCode", "WRONG"),
            ("accessToken", "stale"),
            ("schoolId", "7"),
            ("chatId", "chat-1"),
        ]);
        let query = fetcher.roster_query("A", "tok", "u1", &overrides);

        assert_eq!(query["classCode"], "A");
        assert_eq!(query["accessToken"], "tok");
        assert_eq!(query["userId"], "u1");
        assert_eq!(query["schoolId"], "7");
        assert_eq!(query["chatId"], "chat-1");
    }

    #[test]
    fn pacing_stays_in_range() {
        let client = GatewayClient::new(class_gateway::GatewayConfig::default()).unwrap();
        let config = PipelineConfig::default();
        let fetcher = RosterFetcher::new(&client, &config);

        for _ in 0..50 {
            let delay = fetcher.pacing_delay();
            assert!(delay >= Duration::from_millis(100));
            assert!(delay <= Duration::from_millis(300));
        }
    }
}
