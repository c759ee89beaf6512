use super::*;

#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

fn error_message(resp: reqwest::blocking::Response) -> String {
    let status = resp.status();
    let text = resp.text().unwrap_or_default();
    serde_json::from_str::<ErrorBody>(&text)
        .ok()
        .and_then(|b| b.error)
        .unwrap_or_else(|| {
            if text.trim().is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string()
            } else {
                text
            }
        })
}

impl RemoteClient {
    /// Maps non-success statuses onto the catalog error taxonomy. `what`
    /// names the resource for not-found and conflict messages.
    pub(super) fn ensure_ok(
        &self,
        resp: reqwest::blocking::Response,
        label: &str,
        what: &str,
    ) -> Result<reqwest::blocking::Response, CatalogError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        tracing::debug!(status = status.as_u16(), label, "catalog request failed");
        match status {
            reqwest::StatusCode::UNAUTHORIZED => Err(CatalogError::Unauthorized),
            reqwest::StatusCode::FORBIDDEN => Err(CatalogError::Forbidden),
            reqwest::StatusCode::NOT_FOUND => Err(CatalogError::NotFound(what.to_string())),
            reqwest::StatusCode::CONFLICT => Err(CatalogError::Conflict(what.to_string())),
            reqwest::StatusCode::BAD_REQUEST => {
                Err(CatalogError::BadRequest(error_message(resp)))
            }
            _ => Err(CatalogError::Status {
                context: label.to_string(),
                status: status.as_u16(),
                message: error_message(resp),
            }),
        }
    }

    pub(super) fn auth(&self) -> String {
        format!("Bearer {}", self.remote.token)
    }

    /// Appends `segments` to the base url, percent-encoding each one so ids
    /// containing `/`, `?` or `#` stay a single path segment.
    pub(super) fn url(&self, segments: &[&str]) -> Result<reqwest::Url, CatalogError> {
        let invalid = || CatalogError::InvalidUrl(self.remote.base_url.clone());
        let mut url = reqwest::Url::parse(&self.remote.base_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

pub(super) fn http_err(context: &str) -> impl FnOnce(reqwest::Error) -> CatalogError + '_ {
    move |source| CatalogError::Http {
        context: context.to_string(),
        source,
    }
}
