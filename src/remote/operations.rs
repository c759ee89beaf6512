//! Catalog operations over HTTP.

use super::http_client::http_err;
use super::*;

impl RemoteCatalog for RemoteClient {
    fn list_environments(&self) -> Result<EnvironmentList, CatalogError> {
        tracing::debug!("list environments");
        let resp = self
            .client
            .get(self.url(&["environments"])?)
            .header(reqwest::header::AUTHORIZATION, self.auth())
            .send()
            .map_err(http_err("list environments request"))?;

        self.ensure_ok(resp, "list environments", "environments")?
            .json()
            .map_err(http_err("parse environments"))
    }

    fn list_discovered_applications(
        &self,
        environment_id: &str,
        page: &PageRequest,
    ) -> Result<ApplicationPage, CatalogError> {
        tracing::debug!(
            environment = environment_id,
            limit = page.limit,
            offset = page.offset,
            query = %page.query,
            "list discovered applications"
        );
        let resp = self
            .client
            .get(self.url(&["environments", environment_id, "discovered-applications"])?)
            .header(reqwest::header::AUTHORIZATION, self.auth())
            .query(&[
                ("limit", page.limit.to_string()),
                ("offset", page.offset.to_string()),
                ("query", page.query.clone()),
            ])
            .send()
            .map_err(http_err("list discovered applications request"))?;

        self.ensure_ok(
            resp,
            "list discovered applications",
            &format!("environment {}", environment_id),
        )?
        .json()
        .map_err(http_err("parse discovered applications"))
    }

    fn get_discovered_application(
        &self,
        environment_id: &str,
        application_id: &str,
    ) -> Result<CatalogItem, CatalogError> {
        tracing::debug!(
            environment = environment_id,
            application = application_id,
            "get discovered application"
        );
        let resp = self
            .client
            .get(self.url(&[
                "environments",
                environment_id,
                "discovered-applications",
                application_id,
            ])?)
            .header(reqwest::header::AUTHORIZATION, self.auth())
            .send()
            .map_err(http_err("get discovered application request"))?;

        self.ensure_ok(
            resp,
            "get discovered application",
            &format!("application {}", application_id),
        )?
        .json()
        .map_err(http_err("parse discovered application"))
    }

    fn import_application(&self, request: &ImportRequest) -> Result<ImportResult, CatalogError> {
        tracing::debug!(environment = %request.environment_id, "import application");
        let resp = self
            .client
            .post(self.url(&["discovered-applications", "import"])?)
            .header(reqwest::header::AUTHORIZATION, self.auth())
            .json(request)
            .send()
            .map_err(http_err("import application request"))?;

        self.ensure_ok(resp, "import application", "application")?
            .json()
            .map_err(http_err("parse import result"))
    }
}
