// # DNSPod DNS Provider
//
// This crate provides the DNSPod (Tencent Cloud API 3.0) provider for v6sync.
//
// ## API Calls
//
// - `DescribeRecordList`: one request listing every record in the domain
// - `ModifyRecordBatch`: one request setting the value of several records
//
// Every request is a POST of a JSON body to `dnspod.tencentcloudapi.com`,
// signed with TC3-HMAC-SHA256.
//
// ## Constraints
//
// - One HTTP request per trait call
// - No retry, no backoff, no caching
// - HTTP timeout of 30 seconds; the engine has no timeout of its own
// - Credentials never appear in logs or `Debug` output
//
// ## Error Mapping
//
// - Request could not be sent, timed out, or returned a non-2xx status
//   → `Error::ProviderUnreachable`
// - `Response.Error` in the body → `Error::ProviderRejected` with the
//   Tencent Cloud error code and message
// - Body that is not a valid API response → `Error::ProviderRejected`
//   with code `MalformedResponse`
//
// ## Dry-Run Mode
//
// The record list is fetched as usual; the batch update is logged and
// skipped.

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use serde::Deserialize;
use serde_json::{Value, json};
use sha2::{Digest, Sha256};
use std::time::Duration;
use v6sync_core::traits::{
    Acknowledgment, DnsProvider, RecordStatus, RemoteRecord, UpdateBatch,
};
use v6sync_core::{Error, Result, SyncConfig};

type HmacSha256 = Hmac<Sha256>;

const PROVIDER_NAME: &str = "dnspod";

/// Tencent Cloud API host for DNSPod
const DNSPOD_HOST: &str = "dnspod.tencentcloudapi.com";

/// Service name used in the credential scope
const DNSPOD_SERVICE: &str = "dnspod";

/// DNSPod API version
const DNSPOD_API_VERSION: &str = "2021-03-23";

const SIGN_ALGORITHM: &str = "TC3-HMAC-SHA256";
const SIGNED_HEADERS: &str = "content-type;host;x-tc-action";
const CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Largest page DescribeRecordList accepts
const RECORD_LIST_LIMIT: u64 = 3000;

/// Error code DescribeRecordList returns for a domain without records
const NO_DATA_OF_RECORD: &str = "ResourceNotFound.NoDataOfRecord";

const MALFORMED_RESPONSE: &str = "MalformedResponse";

/// Default HTTP timeout for API requests (30 seconds)
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

const ACTION_DESCRIBE_RECORD_LIST: &str = "DescribeRecordList";
const ACTION_MODIFY_RECORD_BATCH: &str = "ModifyRecordBatch";

/// DNSPod DNS provider
///
/// # Trust Level: Untrusted
///
/// Isolated, stateless and single-shot. The engine decides what to change;
/// this type only speaks the API.
pub struct DnspodProvider {
    /// Tencent Cloud SecretId
    secret_id: String,

    /// Tencent Cloud SecretKey
    /// ⚠️ NEVER log this value
    secret_key: String,

    /// HTTP client for API requests
    client: reqwest::Client,

    /// Dry-run mode: if true, list records but skip the batch update
    dry_run: bool,
}

// Custom Debug implementation that hides the credentials
impl std::fmt::Debug for DnspodProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DnspodProvider")
            .field("secret_id", &"<REDACTED>")
            .field("secret_key", &"<REDACTED>")
            .field("dry_run", &self.dry_run)
            .finish()
    }
}

impl DnspodProvider {
    /// Create a new DNSPod provider
    ///
    /// # Parameters
    ///
    /// - `secret_id`: Tencent Cloud SecretId
    /// - `secret_key`: Tencent Cloud SecretKey
    /// - `dry_run`: If true, list records but skip the batch update
    pub fn new(
        secret_id: impl Into<String>,
        secret_key: impl Into<String>,
        dry_run: bool,
    ) -> Result<Self> {
        let secret_id = secret_id.into();
        let secret_key = secret_key.into();

        if secret_id.is_empty() || secret_key.is_empty() {
            return Err(Error::config("DNSPod SecretId and SecretKey are required"));
        }

        let client = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::Other(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            secret_id,
            secret_key,
            client,
            dry_run,
        })
    }

    /// Create a provider from the run configuration
    pub fn from_config(config: &SyncConfig, dry_run: bool) -> Result<Self> {
        if dry_run {
            tracing::warn!("DNSPod provider running in DRY-RUN mode - no changes will be made");
        }
        Self::new(
            config.credential_id.clone(),
            config.credential_secret.clone(),
            dry_run,
        )
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Send one signed API request and return the `Response` object
    ///
    /// # API Call
    ///
    /// ```http
    /// POST / HTTP/1.1
    /// Host: dnspod.tencentcloudapi.com
    /// Authorization: TC3-HMAC-SHA256 Credential=..., SignedHeaders=..., Signature=...
    /// X-TC-Action: <action>
    /// X-TC-Version: 2021-03-23
    /// X-TC-Timestamp: <unix seconds>
    /// ```
    async fn call(&self, action: &str, params: &Value) -> Result<Value> {
        let payload = serde_json::to_string(params)?;
        let timestamp = chrono::Utc::now().timestamp();
        let authorization = Tc3Signer {
            secret_id: &self.secret_id,
            secret_key: &self.secret_key,
            host: DNSPOD_HOST,
            service: DNSPOD_SERVICE,
        }
        .authorization(action, &payload, timestamp)?;

        tracing::debug!("Calling DNSPod {}", action);

        let response = self
            .client
            .post(format!("https://{}/", DNSPOD_HOST))
            .header("Authorization", authorization)
            .header("Content-Type", CONTENT_TYPE)
            .header("Host", DNSPOD_HOST)
            .header("X-TC-Action", action)
            .header("X-TC-Timestamp", timestamp.to_string())
            .header("X-TC-Version", DNSPOD_API_VERSION)
            .body(payload)
            .send()
            .await
            .map_err(|e| Error::unreachable(PROVIDER_NAME, format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::unreachable(PROVIDER_NAME, format!("failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(Error::unreachable(
                PROVIDER_NAME,
                format!("{} returned HTTP {}: {}", action, status, body),
            ));
        }

        decode_response(&body)
    }
}

#[async_trait]
impl DnsProvider for DnspodProvider {
    /// List every record in `domain`
    ///
    /// # API Call
    ///
    /// ```json
    /// { "Domain": "example.com", "Limit": 3000 }
    /// ```
    async fn list_records(&self, domain: &str) -> Result<Vec<RemoteRecord>> {
        let params = json!({
            "Domain": domain,
            "Limit": RECORD_LIST_LIMIT,
        });

        let response = self.call(ACTION_DESCRIBE_RECORD_LIST, &params).await;
        records_from_result(domain, response)
    }

    /// Set the value of every record in `batch`
    ///
    /// # API Call
    ///
    /// ```json
    /// { "RecordIdList": [1, 2], "Change": "value", "ChangeTo": "2001:db8::1" }
    /// ```
    async fn batch_update_records(&self, batch: &UpdateBatch) -> Result<Acknowledgment> {
        let params = batch_params(batch);

        if self.dry_run {
            tracing::info!(
                "[DRY-RUN] Would call {} with payload: {}",
                ACTION_MODIFY_RECORD_BATCH,
                params
            );
            return Ok(Acknowledgment {
                request_id: "dry-run".to_string(),
                job_id: None,
                raw: json!({ "DryRun": true, "Request": params }),
            });
        }

        let response = self.call(ACTION_MODIFY_RECORD_BATCH, &params).await?;
        decode_batch_ack(response)
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }
}

/// Request body for ModifyRecordBatch
fn batch_params(batch: &UpdateBatch) -> Value {
    json!({
        "RecordIdList": batch.ids(),
        "Change": batch.change(),
        "ChangeTo": batch.change_to().to_string(),
    })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ApiError {
    code: String,
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RecordListItem {
    record_id: u64,
    name: String,
    #[serde(rename = "Type")]
    record_type: String,
    value: String,
    status: String,
}

impl From<RecordListItem> for RemoteRecord {
    fn from(item: RecordListItem) -> Self {
        let status = if item.status == "ENABLE" {
            RecordStatus::Enabled
        } else {
            RecordStatus::Disabled
        };
        RemoteRecord {
            id: item.record_id,
            record_type: item.record_type,
            name: item.name,
            value: item.value,
            status,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RecordCountInfo {
    total_count: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeRecordListResponse {
    #[serde(default)]
    record_list: Vec<RecordListItem>,
    record_count_info: Option<RecordCountInfo>,
}

impl DescribeRecordListResponse {
    /// Records the provider counted but did not return in this page
    fn unchecked_count(&self) -> u64 {
        self.record_count_info
            .as_ref()
            .map_or(0, |info| info.total_count.saturating_sub(self.record_list.len() as u64))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ModifyRecordBatchResponse {
    request_id: String,
    job_id: Option<u64>,
}

fn malformed(detail: impl std::fmt::Display) -> Error {
    Error::rejected(PROVIDER_NAME, MALFORMED_RESPONSE, detail.to_string())
}

/// Extract the `Response` object from an API body, surfacing `Response.Error`
fn decode_response(body: &str) -> Result<Value> {
    let mut envelope: Value = serde_json::from_str(body).map_err(malformed)?;
    let response = envelope
        .get_mut("Response")
        .map(Value::take)
        .filter(Value::is_object)
        .ok_or_else(|| malformed("body has no Response object"))?;

    if let Some(error) = response.get("Error") {
        let error: ApiError = serde_json::from_value(error.clone()).map_err(malformed)?;
        let request_id = response
            .get("RequestId")
            .and_then(Value::as_str)
            .unwrap_or("unknown");
        tracing::debug!("DNSPod request {} failed with {}", request_id, error.code);
        return Err(Error::rejected(PROVIDER_NAME, error.code, error.message));
    }

    Ok(response)
}

/// Turn a DescribeRecordList result into records
///
/// A domain without records is reported as `NoDataOfRecord`, which is an
/// empty list rather than a failure.
fn records_from_result(domain: &str, result: Result<Value>) -> Result<Vec<RemoteRecord>> {
    match result {
        Ok(response) => decode_record_list(response),
        Err(Error::ProviderRejected { code, .. }) if code == NO_DATA_OF_RECORD => {
            tracing::debug!("Domain {} has no records", domain);
            Ok(Vec::new())
        }
        Err(e) => Err(e),
    }
}

fn decode_record_list(response: Value) -> Result<Vec<RemoteRecord>> {
    let decoded: DescribeRecordListResponse =
        serde_json::from_value(response).map_err(malformed)?;

    let unchecked = decoded.unchecked_count();
    if unchecked > 0 {
        tracing::warn!(
            "DNSPod returned {} records, {} more were not returned and are not checked",
            decoded.record_list.len(),
            unchecked
        );
    }

    Ok(decoded.record_list.into_iter().map(RemoteRecord::from).collect())
}

fn decode_batch_ack(response: Value) -> Result<Acknowledgment> {
    let decoded: ModifyRecordBatchResponse =
        serde_json::from_value(response.clone()).map_err(malformed)?;

    Ok(Acknowledgment {
        request_id: decoded.request_id,
        job_id: decoded.job_id,
        raw: response,
    })
}

fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

fn hmac_sha256(key: &[u8], msg: &[u8]) -> Result<Vec<u8>> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| Error::Other(format!("HMAC key rejected: {}", e)))?;
    mac.update(msg);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// TC3-HMAC-SHA256 request signer for one Tencent Cloud service
struct Tc3Signer<'a> {
    secret_id: &'a str,
    secret_key: &'a str,
    host: &'a str,
    service: &'a str,
}

impl Tc3Signer<'_> {
    /// Build the `Authorization` header value
    ///
    /// The canonical request signs `content-type`, `host` and `x-tc-action`
    /// over a POST to `/` with an empty query string. The credential scope is
    /// `<UTC date>/<service>/tc3_request`.
    fn authorization(&self, action: &str, payload: &str, timestamp: i64) -> Result<String> {
        let date = chrono::DateTime::from_timestamp(timestamp, 0)
            .ok_or_else(|| Error::Other(format!("timestamp {} out of range", timestamp)))?
            .format("%Y-%m-%d")
            .to_string();

        let canonical_headers = format!(
            "content-type:{}\nhost:{}\nx-tc-action:{}\n",
            CONTENT_TYPE,
            self.host,
            action.to_lowercase()
        );
        let canonical_request = format!(
            "POST\n/\n\n{}\n{}\n{}",
            canonical_headers,
            SIGNED_HEADERS,
            sha256_hex(payload.as_bytes())
        );

        let credential_scope = format!("{}/{}/tc3_request", date, self.service);
        let string_to_sign = format!(
            "{}\n{}\n{}\n{}",
            SIGN_ALGORITHM,
            timestamp,
            credential_scope,
            sha256_hex(canonical_request.as_bytes())
        );

        let secret_date =
            hmac_sha256(format!("TC3{}", self.secret_key).as_bytes(), date.as_bytes())?;
        let secret_service = hmac_sha256(&secret_date, self.service.as_bytes())?;
        let secret_signing = hmac_sha256(&secret_service, b"tc3_request")?;
        let signature = hex::encode(hmac_sha256(&secret_signing, string_to_sign.as_bytes())?);

        Ok(format!(
            "{} Credential={}/{}, SignedHeaders={}, Signature={}",
            SIGN_ALGORITHM, self.secret_id, credential_scope, SIGNED_HEADERS, signature
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TS: i64 = 1_551_113_065; // 2019-02-25T16:44:25Z

    #[test]
    fn test_empty_credentials_rejected() {
        assert!(DnspodProvider::new("", "key", false).unwrap_err().is_config());
        assert!(DnspodProvider::new("id", "", false).unwrap_err().is_config());
    }

    #[test]
    fn test_from_config_and_dry_run() {
        let config = SyncConfig::new("example.com", "AKIDtest", "secret", ["www"]).unwrap();
        let dry = DnspodProvider::from_config(&config, true).unwrap();
        let live = DnspodProvider::from_config(&config, false).unwrap();
        assert!(dry.is_dry_run());
        assert!(!live.is_dry_run());
        assert_eq!(live.provider_name(), "dnspod");
    }

    #[test]
    fn test_credentials_not_exposed_in_debug() {
        let provider = DnspodProvider::new("AKIDvisible", "secret_key_12345", false).unwrap();
        let debug_str = format!("{:?}", provider);
        assert!(!debug_str.contains("AKIDvisible"));
        assert!(!debug_str.contains("secret_key_12345"));
        assert!(debug_str.contains("DnspodProvider"));
    }

    fn dnspod_signer<'a>(secret_id: &'a str, secret_key: &'a str) -> Tc3Signer<'a> {
        Tc3Signer {
            secret_id,
            secret_key,
            host: DNSPOD_HOST,
            service: DNSPOD_SERVICE,
        }
    }

    #[test]
    fn test_tc3_known_answer() {
        // Worked example from the Tencent Cloud API 3.0 signature guide
        let signer = Tc3Signer {
            secret_id: "AKIDz8krbsJ5yKBZQpn74WFkmLPx3*******",
            secret_key: "Gu5t9xGARNpq86cd98joQYCN3*******",
            host: "cvm.tencentcloudapi.com",
            service: "cvm",
        };
        let payload =
            r#"{"Limit": 1, "Filters": [{"Values": ["\u672a\u547d\u540d"], "Name": "instance-name"}]}"#;
        assert_eq!(
            sha256_hex(payload.as_bytes()),
            "35e9c5b0e3ae67532d3c9f17ead6c90222632e5b1ff7f6e89887f1398934f064"
        );

        let header = signer.authorization("DescribeInstances", payload, TS).unwrap();
        assert_eq!(
            header,
            "TC3-HMAC-SHA256 Credential=AKIDz8krbsJ5yKBZQpn74WFkmLPx3*******/2019-02-25/cvm/tc3_request, \
             SignedHeaders=content-type;host;x-tc-action, \
             Signature=be4f67d323c78ab9acb7395e43c0dbcf822a9cfac32fea2449a7bc7726b770a3"
        );
    }

    #[test]
    fn test_dnspod_credential_scope() {
        let header = dnspod_signer("AKIDtest", "secret")
            .authorization("DescribeRecordList", "{}", TS)
            .unwrap();

        assert!(header.starts_with(
            "TC3-HMAC-SHA256 Credential=AKIDtest/2019-02-25/dnspod/tc3_request, \
             SignedHeaders=content-type;host;x-tc-action, Signature="
        ));
        assert!(!header.contains("secret"));
    }

    #[test]
    fn test_signature_depends_on_every_input() {
        let sign = |key: &str, action: &str, payload: &str, ts: i64| {
            dnspod_signer("id", key).authorization(action, payload, ts).unwrap()
        };
        let base = sign("key", "DescribeRecordList", "{}", TS);
        assert_eq!(base, sign("key", "DescribeRecordList", "{}", TS));
        assert_ne!(base, sign("other", "DescribeRecordList", "{}", TS));
        assert_ne!(base, sign("key", "ModifyRecordBatch", "{}", TS));
        assert_ne!(base, sign("key", "DescribeRecordList", "{ }", TS));
        assert_ne!(base, sign("key", "DescribeRecordList", "{}", TS + 1));
    }

    #[test]
    fn test_hmac_sha256_known_vector() {
        // RFC 4231 test case 2
        let mac = hmac_sha256(b"Jefe", b"what do ya want for nothing?").unwrap();
        assert_eq!(
            hex::encode(mac),
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn test_decode_record_list() {
        let body = r#"{
            "Response": {
                "RecordCountInfo": {"SubdomainCount": 3, "ListCount": 3, "TotalCount": 3},
                "RecordList": [
                    {"RecordId": 556507778, "Value": "2001:db8::", "Status": "ENABLE", "UpdatedOn": "2021-03-28 11:27:09",
                     "Name": "www", "Line": "默认", "LineId": "0", "Type": "AAAA", "MonitorStatus": "", "Remark": "", "TTL": 600, "MX": 0},
                    {"RecordId": 556507779, "Value": "2001:db8::", "Status": "DISABLE", "Name": "@", "Type": "AAAA", "TTL": 600},
                    {"RecordId": 556507780, "Value": "f1g1ns1.dnspod.net.", "Status": "ENABLE", "Name": "@", "Type": "NS", "TTL": 86400}
                ],
                "RequestId": "aa2f4b32-0bd4-4b7d-9f13-7c4a5e1f8a21"
            }
        }"#;

        let records = decode_record_list(decode_response(body).unwrap()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(
            records[0],
            RemoteRecord {
                id: 556507778,
                record_type: "AAAA".to_string(),
                name: "www".to_string(),
                value: "2001:db8::".to_string(),
                status: RecordStatus::Enabled,
            }
        );
        assert_eq!(records[1].status, RecordStatus::Disabled);
        assert_eq!(records[2].record_type, "NS");
    }

    #[test]
    fn test_empty_domain_is_empty_list() {
        let body = r#"{
            "Response": {
                "Error": {"Code": "ResourceNotFound.NoDataOfRecord", "Message": "记录列表为空。"},
                "RequestId": "5e9a1d7c-3b0f-4a57-8d2e-0c1f6b4e9a33"
            }
        }"#;

        let records = records_from_result("example.com", decode_response(body)).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_other_list_rejections_propagate() {
        let body = r#"{
            "Response": {
                "Error": {"Code": "InvalidParameter.DomainNotExists", "Message": "当前域名有误，请返回重新操作。"},
                "RequestId": "9f0c2e1b-7a4d-4c36-b5e8-21d3f7a60c14"
            }
        }"#;

        match records_from_result("example.com", decode_response(body)) {
            Err(Error::ProviderRejected { code, .. }) => {
                assert_eq!(code, "InvalidParameter.DomainNotExists")
            }
            other => panic!("expected rejection, got {:?}", other),
        }

        let unreachable = Err(Error::unreachable("dnspod", "timed out"));
        assert!(matches!(
            records_from_result("example.com", unreachable),
            Err(Error::ProviderUnreachable { .. })
        ));
    }

    #[test]
    fn test_truncated_page_keeps_returned_records() {
        let response = json!({
            "RecordCountInfo": {"SubdomainCount": 2, "ListCount": 1, "TotalCount": 3001},
            "RecordList": [
                {"RecordId": 1, "Value": "2001:db8::1", "Status": "ENABLE", "Name": "www", "Type": "AAAA"}
            ],
            "RequestId": "0b7e4c2a-19f5-4d88-a6c3-5e2f1d9b7a40"
        });

        let decoded: DescribeRecordListResponse =
            serde_json::from_value(response.clone()).unwrap();
        assert_eq!(decoded.unchecked_count(), 3000);

        let records = records_from_result("example.com", Ok(response)).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, 1);
    }

    #[test]
    fn test_complete_page_has_nothing_unchecked() {
        let complete: DescribeRecordListResponse = serde_json::from_value(json!({
            "RecordCountInfo": {"TotalCount": 1},
            "RecordList": [
                {"RecordId": 1, "Value": "2001:db8::1", "Status": "ENABLE", "Name": "www", "Type": "AAAA"}
            ]
        }))
        .unwrap();
        assert_eq!(complete.unchecked_count(), 0);

        let without_count: DescribeRecordListResponse =
            serde_json::from_value(json!({ "RecordList": [] })).unwrap();
        assert_eq!(without_count.unchecked_count(), 0);
    }

    #[test]
    fn test_decode_api_error() {
        let body = r#"{
            "Response": {
                "Error": {"Code": "AuthFailure.SignatureFailure", "Message": "The provided credentials could not be validated."},
                "RequestId": "ed93f3cb-f35e-473f-b9f3-0d451b8b79c6"
            }
        }"#;

        match decode_response(body).unwrap_err() {
            Error::ProviderRejected { provider, code, message } => {
                assert_eq!(provider, "dnspod");
                assert_eq!(code, "AuthFailure.SignatureFailure");
                assert_eq!(message, "The provided credentials could not be validated.");
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_malformed_bodies() {
        for body in ["not json", "{}", r#"{"Response": "oops"}"#, r#"{"Response": {"Error": {"Code": 1}}}"#] {
            match decode_response(body) {
                Err(Error::ProviderRejected { code, .. }) => assert_eq!(code, "MalformedResponse"),
                other => panic!("expected malformed response for {body}, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_decode_batch_ack() {
        let body = r#"{
            "Response": {
                "JobId": 175317,
                "DetailList": [{"Id": 556507778, "Domain": "example.com", "DomainGrade": "DP_FREE", "ErrMsg": null, "Status": "running", "Operation": "", "RecordList": []}],
                "RequestId": "a6a1a2c4-1e2f-4e5b-8f0f-9d5b0c6a7b8c"
            }
        }"#;

        let ack = decode_batch_ack(decode_response(body).unwrap()).unwrap();
        assert_eq!(ack.request_id, "a6a1a2c4-1e2f-4e5b-8f0f-9d5b0c6a7b8c");
        assert_eq!(ack.job_id, Some(175317));
        assert_eq!(ack.raw["DetailList"][0]["Id"], 556507778);
    }

    #[test]
    fn test_batch_params() {
        let batch = UpdateBatch::new([9, 3], "2001:db8::1".parse().unwrap());
        assert_eq!(
            batch_params(&batch),
            json!({"RecordIdList": [3, 9], "Change": "value", "ChangeTo": "2001:db8::1"})
        );
    }

    #[tokio::test]
    async fn test_dry_run_skips_write() {
        let provider = DnspodProvider::new("id", "key", true).unwrap();
        let batch = UpdateBatch::new([1], "2001:db8::1".parse().unwrap());

        let ack = provider.batch_update_records(&batch).await.unwrap();
        assert_eq!(ack.request_id, "dry-run");
        assert_eq!(ack.raw["Request"]["RecordIdList"], json!([1]));
    }
}
