//! Salesforce implementation of [`MetadataProvider`].
//!
//! Authentication uses the SOAP `login` call with username, password and
//! security token. Field metadata comes from a SOQL query against
//! `FieldDefinition` through the REST query endpoint:
//!
//! ```text
//! POST {login_url}/services/Soap/u/{version}      ──► sessionId, serverUrl
//! GET  {instance}/services/data/v{version}/query   ──► records (+ nextRecordsUrl)
//! ```

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::{debug, info};

use super::error::{MetadataError, MetadataResult};
use super::provider::{validate_object_name, MetadataProvider};
use crate::record::FieldDescriptor;

/// Default login endpoint for production orgs.
pub const DEFAULT_LOGIN_URL: &str = "https://login.salesforce.com";

/// Default API version for both the SOAP and REST calls.
pub const DEFAULT_API_VERSION: &str = "59.0";

/// Username/password credentials for the SOAP login call.
#[derive(Clone)]
pub struct SalesforceCredentials {
    pub username: String,
    pub password: String,
    pub security_token: String,
}

impl SalesforceCredentials {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        security_token: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            security_token: security_token.into(),
        }
    }
}

impl fmt::Debug for SalesforceCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SalesforceCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("security_token", &"<redacted>")
            .finish()
    }
}

/// An authenticated session.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Session {
    session_id: String,
    /// Scheme and host of the org, e.g. `https://acme.my.salesforce.com`.
    instance_url: String,
}

/// Fetches field metadata from a Salesforce org.
pub struct SalesforceMetadataProvider {
    client: Client,
    login_url: String,
    api_version: String,
    credentials: SalesforceCredentials,
}

impl SalesforceMetadataProvider {
    /// Create a provider with the default login URL and API version.
    pub fn new(credentials: SalesforceCredentials) -> MetadataResult<Self> {
        Self::with_options(credentials, DEFAULT_LOGIN_URL, DEFAULT_API_VERSION, Duration::from_secs(30))
    }

    /// Create a provider against a specific login endpoint (e.g. a sandbox).
    pub fn with_options(
        credentials: SalesforceCredentials,
        login_url: impl Into<String>,
        api_version: impl Into<String>,
        connect_timeout: Duration,
    ) -> MetadataResult<Self> {
        let client = Client::builder().connect_timeout(connect_timeout).build()?;

        Ok(Self {
            client,
            login_url: login_url.into().trim_end_matches('/').to_string(),
            api_version: api_version.into(),
            credentials,
        })
    }

    /// The API version used for requests.
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    async fn login(&self) -> MetadataResult<Session> {
        let url = format!("{}/services/Soap/u/{}", self.login_url, self.api_version);
        debug!(%url, username = %self.credentials.username, "logging in");

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "text/xml; charset=UTF-8")
            .header("SOAPAction", "login")
            .body(login_envelope(&self.credentials))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        let session = parse_login_response(status.as_u16(), &body)?;

        debug!(%status, instance = %session.instance_url, "logged in");
        Ok(session)
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(&self, session: &Session, url: Url) -> MetadataResult<T> {
        let response = self.client.get(url).bearer_auth(&session.session_id).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MetadataError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }

    async fn query_all(&self, session: &Session, soql: &str) -> MetadataResult<Vec<FieldDefinitionRow>> {
        let base = Url::parse(&session.instance_url)
            .map_err(|e| MetadataError::MalformedResponse(format!("instance URL: {e}")))?;

        let mut url = base
            .join(&format!("/services/data/v{}/query", self.api_version))
            .map_err(|e| MetadataError::MalformedResponse(format!("query URL: {e}")))?;
        url.query_pairs_mut().append_pair("q", soql);

        let mut rows = Vec::new();
        loop {
            let page: QueryResponse = self.get_json(session, url).await?;
            debug!(records = page.records.len(), done = page.done, "query page");
            rows.extend(page.records);

            match (page.done, page.next_records_url) {
                (false, Some(next)) => {
                    url = base
                        .join(&next)
                        .map_err(|e| MetadataError::MalformedResponse(format!("nextRecordsUrl: {e}")))?;
                }
                _ => break,
            }
        }

        Ok(rows)
    }
}

#[async_trait]
impl MetadataProvider for SalesforceMetadataProvider {
    async fn describe_fields(&self, object: &str) -> MetadataResult<Vec<FieldDescriptor>> {
        validate_object_name(object)?;

        let session = self.login().await?;
        let rows = self.query_all(&session, &field_definition_query(object)).await?;

        info!(object, fields = rows.len(), "described object");
        Ok(rows.into_iter().map(Into::into).collect())
    }
}

/// SOQL listing the fields of an object.
///
/// Callers must validate `object` first; it is interpolated verbatim.
pub fn field_definition_query(object: &str) -> String {
    format!(
        "SELECT QualifiedApiName, DataType \
         FROM FieldDefinition \
         WHERE EntityDefinition.QualifiedApiName = '{object}'"
    )
}

/// One page of a REST query result.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QueryResponse {
    done: bool,
    #[serde(default)]
    next_records_url: Option<String>,
    records: Vec<FieldDefinitionRow>,
}

/// A `FieldDefinition` row as returned by the query.
#[derive(Debug, Deserialize)]
struct FieldDefinitionRow {
    #[serde(rename = "QualifiedApiName")]
    qualified_api_name: String,
    #[serde(rename = "DataType")]
    data_type: String,
}

impl From<FieldDefinitionRow> for FieldDescriptor {
    fn from(row: FieldDefinitionRow) -> Self {
        FieldDescriptor::new(row.qualified_api_name, row.data_type)
    }
}

fn login_envelope(credentials: &SalesforceCredentials) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8" ?>
<env:Envelope
        xmlns:xsd="http://www.w3.org/2001/XMLSchema"
        xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
        xmlns:env="http://schemas.xmlsoap.org/soap/envelope/"
        xmlns:urn="urn:partner.soap.sforce.com">
    <env:Header>
        <urn:CallOptions>
            <urn:client>sflow</urn:client>
        </urn:CallOptions>
    </env:Header>
    <env:Body>
        <n1:login xmlns:n1="urn:partner.soap.sforce.com">
            <n1:username>{}</n1:username>
            <n1:password>{}{}</n1:password>
        </n1:login>
    </env:Body>
</env:Envelope>"#,
        escape_xml(&credentials.username),
        escape_xml(&credentials.password),
        escape_xml(&credentials.security_token),
    )
}

fn escape_xml(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&apos;"),
            c => result.push(c),
        }
    }
    result
}

/// Text content of the first `<tag>` element in `body`.
fn element_text<'a>(body: &'a str, tag: &str) -> Option<&'a str> {
    let open = format!("<{tag}>");
    let close = format!("</{tag}>");
    let start = body.find(&open)? + open.len();
    let len = body[start..].find(&close)?;
    Some(&body[start..start + len])
}

/// Faults come back as HTTP 500 with a SOAP body, so they are checked before
/// the status.
fn parse_login_response(status: u16, body: &str) -> MetadataResult<Session> {
    if let Some(code) = element_text(body, "faultcode") {
        let message = element_text(body, "faultstring").unwrap_or_default();
        return Err(MetadataError::login_fault(code, message));
    }

    if !(200..300).contains(&status) {
        return Err(MetadataError::Api {
            status,
            body: body.to_string(),
        });
    }

    let session_id = element_text(body, "sessionId")
        .ok_or_else(|| MetadataError::MalformedResponse("login response has no sessionId".to_string()))?;
    let server_url = element_text(body, "serverUrl")
        .ok_or_else(|| MetadataError::MalformedResponse("login response has no serverUrl".to_string()))?;

    let server_url = Url::parse(server_url)
        .map_err(|e| MetadataError::MalformedResponse(format!("serverUrl {server_url:?}: {e}")))?;
    let instance_url = server_url.origin().ascii_serialization();

    Ok(Session {
        session_id: session_id.to_string(),
        instance_url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOGIN_OK: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/">
<soapenv:Body><loginResponse><result>
<metadataServerUrl>https://acme.my.salesforce.com/services/Soap/m/59.0/00D000000000001</metadataServerUrl>
<passwordExpired>false</passwordExpired>
<serverUrl>https://acme.my.salesforce.com/services/Soap/u/59.0/00D000000000001</serverUrl>
<sessionId>00D000000000001!AQ4AQ.token</sessionId>
</result></loginResponse></soapenv:Body></soapenv:Envelope>"#;

    const LOGIN_FAULT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/">
<soapenv:Body><soapenv:Fault>
<faultcode>INVALID_LOGIN</faultcode>
<faultstring>INVALID_LOGIN: Invalid username, password, security token; or user locked out.</faultstring>
</soapenv:Fault></soapenv:Body></soapenv:Envelope>"#;

    #[test]
    fn test_parse_login_response() {
        let session = parse_login_response(200, LOGIN_OK).unwrap();
        assert_eq!(session.session_id, "00D000000000001!AQ4AQ.token");
        assert_eq!(session.instance_url, "https://acme.my.salesforce.com");
    }

    #[test]
    fn test_parse_login_fault() {
        match parse_login_response(500, LOGIN_FAULT) {
            Err(MetadataError::LoginFault { code, message }) => {
                assert_eq!(code, "INVALID_LOGIN");
                assert!(message.starts_with("INVALID_LOGIN:"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_parse_login_missing_session() {
        assert!(matches!(
            parse_login_response(200, "<result></result>"),
            Err(MetadataError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_parse_login_error_page_keeps_status() {
        let page = "<html><body>Service Unavailable</body></html>";
        match parse_login_response(503, page) {
            Err(MetadataError::Api { status, body }) => {
                assert_eq!(status, 503);
                assert_eq!(body, page);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_login_envelope_escapes_credentials() {
        let creds = SalesforceCredentials::new("ops@acme.com", "p<ss&", "TOKEN");
        let envelope = login_envelope(&creds);
        assert!(envelope.contains("<n1:username>ops@acme.com</n1:username>"));
        assert!(envelope.contains("<n1:password>p&lt;ss&amp;TOKEN</n1:password>"));
    }

    #[test]
    fn test_credentials_debug_redacts_secrets() {
        let creds = SalesforceCredentials::new("ops@acme.com", "hunter2", "TOKEN");
        let debug = format!("{creds:?}");
        assert!(debug.contains("ops@acme.com"));
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("TOKEN"));
    }

    #[test]
    fn test_field_definition_query() {
        let soql = field_definition_query("Opportunity");
        assert_eq!(
            soql,
            "SELECT QualifiedApiName, DataType FROM FieldDefinition \
             WHERE EntityDefinition.QualifiedApiName = 'Opportunity'"
        );
    }

    #[test]
    fn test_query_response_deserializes() {
        let json = r#"{
            "totalSize": 2,
            "done": false,
            "nextRecordsUrl": "/services/data/v59.0/query/01g-2000",
            "records": [
                {"attributes": {"type": "FieldDefinition"}, "QualifiedApiName": "Id", "DataType": "Lookup()"},
                {"attributes": {"type": "FieldDefinition"}, "QualifiedApiName": "Amount", "DataType": "Currency(16, 2)"}
            ]
        }"#;

        let page: QueryResponse = serde_json::from_str(json).unwrap();
        assert!(!page.done);
        assert_eq!(page.next_records_url.as_deref(), Some("/services/data/v59.0/query/01g-2000"));

        let fields: Vec<FieldDescriptor> = page.records.into_iter().map(Into::into).collect();
        assert_eq!(fields[1], FieldDescriptor::new("Amount", "Currency(16, 2)"));
    }

    #[test]
    fn test_with_options_trims_login_url() {
        let creds = SalesforceCredentials::new("u", "p", "t");
        let provider =
            SalesforceMetadataProvider::with_options(creds, "https://test.salesforce.com/", "60.0", Duration::from_secs(5))
                .unwrap();
        assert_eq!(provider.login_url, "https://test.salesforce.com");
        assert_eq!(provider.api_version(), "60.0");
    }
}
