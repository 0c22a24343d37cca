//! レスポンスエンベロープの検証
//!
//! ルート要素の `type` / `error` 属性で呼び出し全体の成否を判定する。
//! 成功時はルート要素をそのまま返し、各メソッドが必要なパスを取り出す。
use crate::api::error::ApiError;
use crate::api::xml::XmlNode;
use crate::domain::coerce;
use tracing::warn;

/// エンベロープの `type` 属性
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeType {
    Success,
    Failure,
    Warning,
}

impl EnvelopeType {
    fn from_attr(value: &str) -> Option<Self> {
        match value {
            "Success" => Some(Self::Success),
            "Failure" => Some(Self::Failure),
            "Warning" => Some(Self::Warning),
            _ => None,
        }
    }
}

/// レスポンス本文を解析し、エンベロープを検証する
///
/// # Errors
/// - XMLとして読めない: コード1
/// - Failure/Warning で `message` 子要素あり: そのテキスト
/// - Failure/Warning で `error` 属性あり: 先頭1文字を除いた数値をコードとする
/// - それ以外の不正な形: コード1
pub fn validate(body: &str) -> Result<XmlNode, ApiError> {
    let root = XmlNode::parse(body).map_err(|e| {
        warn!(error = %e, "response body is not valid XML");
        ApiError::invalid_response().with_source(e)
    })?;

    let envelope_type = root.attr("type").and_then(EnvelopeType::from_attr);

    if envelope_type == Some(EnvelopeType::Success) && root.attr("error") == Some("0") {
        return Ok(root);
    }

    Err(failure_from(&root, envelope_type))
}

fn failure_from(root: &XmlNode, envelope_type: Option<EnvelopeType>) -> ApiError {
    if matches!(
        envelope_type,
        Some(EnvelopeType::Failure) | Some(EnvelopeType::Warning)
    ) {
        if let Some(message) = root.child_text("message") {
            warn!(server_message = message, "API reported a failure");
            return ApiError::with_message(message);
        }

        if let Some(error) = root.attr("error") {
            let code = coerce::to_int(error.get(1..).unwrap_or(""));
            warn!(code, "API reported a failure code");
            return ApiError::from_code(code);
        }
    }

    warn!(
        envelope_type = root.attr("type"),
        error = root.attr("error"),
        "unrecognized response envelope"
    );
    ApiError::invalid_response()
}
