//! Paginated class discovery.

use class_gateway::{GatewayClient, ParamMap};
use tracing::{info, warn};

use crate::config::PipelineConfig;
use crate::merge::{merge_params, DISCOVERY_PROTECTED};
use crate::models::ClassRecord;

/// Enumerates a teacher's classes across a fixed number of listing pages.
pub struct ClassDiscovery<'a> {
    client: &'a GatewayClient,
    config: &'a PipelineConfig,
}

impl<'a> ClassDiscovery<'a> {
    pub fn new(client: &'a GatewayClient, config: &'a PipelineConfig) -> Self {
        Self { client, config }
    }

    /// Query parameters for page 1, before teacher configuration is applied.
    pub fn default_query(&self, token: &str) -> ParamMap {
        let page_size = self.config.page_size.to_string();
        let pairs: [(&str, &str); 10] = [
            ("appId", self.client.config().app_id.as_str()),
            ("appVersion", ""),
            ("accessToken", token),
            ("userId", ""),
            ("classStatus", "3"),
            ("schoolId", "3"),
            ("teacherCode", ""),
            ("teacherType", "1"),
            ("pageSize", page_size.as_str()),
            ("pageNo", "1"),
        ];
        crate::merge::param_map(pairs)
    }

    /// Fetch every page and concatenate the classes in server order.
    ///
    /// Always requests `page_count` pages, even after a short page. A page
    /// that fails contributes nothing and the run continues.
    pub async fn list_classes(&self, token: &str, gateway_params: &ParamMap) -> Vec<ClassRecord> {
        let mut query = merge_params(&self.default_query(token), gateway_params, DISCOVERY_PROTECTED);
        let headers = merge_params(
            &self.client.config().class_list_headers(),
            gateway_params,
            DISCOVERY_PROTECTED,
        );

        let mut classes = Vec::new();
        for page in 1..=self.config.page_count {
            query.insert("pageNo".to_string(), page.to_string());

            match self.client.list_classes(&query, &headers).await {
                Ok(entries) => {
                    info!(page, count = entries.len(), "Fetched class page");
                    classes.extend(entries.into_iter().map(ClassRecord::from));
                }
                Err(e) => {
                    warn!(page, error = %e, "Class page failed, treating as empty");
                }
            }
        }

        info!(total = classes.len(), "Class discovery complete");
        classes
    }
}
