use crate::core::request::ResponseKind;
use crate::error::{AssistError, Result};

const FENCE: &str = "```";

/// Pulls the payload for `kind` out of a model reply.
///
/// Code kinds take the text between the first "```{kind}" marker and the next
/// "```" (or the end of the reply when the block is never closed). Only the
/// first matching block is considered; later blocks are ignored. Text replies
/// are returned trimmed.
pub fn extract_payload(completion: &str, kind: ResponseKind) -> Result<String> {
    if !kind.is_code() {
        return Ok(completion.trim().to_string());
    }

    let marker = format!("{FENCE}{}", kind.fence_tag());
    let start = completion
        .find(&marker)
        .map(|i| i + marker.len())
        .ok_or(AssistError::Extraction(kind))?;

    let rest = &completion[start..];
    let end = rest.find(FENCE).unwrap_or(rest.len());
    Ok(rest[..end].trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_tagged_block() {
        let reply = "Here:\n```python\nprint(1)\n```\ndone";
        let code = extract_payload(reply, ResponseKind::Python).unwrap();
        assert_eq!(code, "print(1)");
    }

    #[test]
    fn missing_fence_names_kind() {
        let reply = "SELECT * FROM users;";
        let err = extract_payload(reply, ResponseKind::Sql).unwrap_err();
        assert!(matches!(err, AssistError::Extraction(ResponseKind::Sql)));
        assert!(err.to_string().contains("sql"));
    }

    #[test]
    fn extracted_payload_does_not_extract_again() {
        let reply = "```sql\nSELECT 1;\n```";
        let payload = extract_payload(reply, ResponseKind::Sql).unwrap();
        assert_eq!(payload, "SELECT 1;");
        assert!(extract_payload(&payload, ResponseKind::Sql).is_err());
    }

    #[test]
    fn untagged_fence_is_not_a_match() {
        let reply = "```\nprint(1)\n```";
        assert!(extract_payload(reply, ResponseKind::Python).is_err());
    }

    #[test]
    fn first_matching_block_wins() {
        let reply = "```python\nfirst()\n```\ntext\n```python\nsecond()\n```";
        let code = extract_payload(reply, ResponseKind::Python).unwrap();
        assert_eq!(code, "first()");
    }

    #[test]
    fn other_tagged_blocks_before_target_are_skipped() {
        let reply = "```bash\npip install x\n```\n```python\nimport x\n```";
        let code = extract_payload(reply, ResponseKind::Python).unwrap();
        assert_eq!(code, "import x");
    }

    #[test]
    fn unclosed_block_runs_to_end() {
        let reply = "```sql\nSELECT name FROM t;\n";
        let code = extract_payload(reply, ResponseKind::Sql).unwrap();
        assert_eq!(code, "SELECT name FROM t;");
    }

    #[test]
    fn text_kind_returns_trimmed_reply() {
        let reply = "\n  Rust is a systems language.  \n";
        assert_eq!(
            extract_payload(reply, ResponseKind::Text).unwrap(),
            "Rust is a systems language."
        );
    }
}
