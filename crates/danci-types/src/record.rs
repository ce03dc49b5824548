use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Canonical explanation for one resolved word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailRecord {
    #[serde(default)]
    pub word: String,
    #[serde(default)]
    pub pinyin: String,
    #[serde(default)]
    pub meanings: Vec<Meaning>,
    #[serde(default)]
    pub synonyms: Vec<Synonym>,
    #[serde(default)]
    pub usage_tips: String,
    #[serde(default)]
    pub summary: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meaning {
    #[serde(default)]
    pub part_of_speech: String,
    #[serde(default)]
    pub short_definition: String,
    #[serde(default)]
    pub definition: String,
    #[serde(default)]
    pub examples: Vec<Example>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Example {
    #[serde(default)]
    pub scenario: String,
    pub zh: String,
    pub jp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Synonym {
    pub word: String,
    #[serde(default)]
    pub pinyin: String,
    #[serde(default)]
    pub nuance: String,
}

/// Spoken/written register of a disambiguation candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UsageRegister {
    #[serde(rename = "口")]
    Spoken,
    #[serde(rename = "書")]
    Written,
    #[serde(rename = "口・書")]
    Both,
}

/// One ranked option offered when the input maps to several Chinese
/// expressions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub zh: String,
    #[serde(default)]
    pub pinyin: String,
    #[serde(default)]
    pub jp_meaning: String,
    pub usage: UsageRegister,
    pub recommendation: u8,
}

/// Persisted vocabulary row. `data` is an opaque blob on write and goes
/// through [`DetailRecord::from_value`] on display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedEntry {
    pub id: String,
    pub word: String,
    pub data: Value,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub created_at: String,
}

/// What the generation backend may answer with.
///
/// Serialization always carries the `type` tag; deserialization goes
/// through [`GenerationResponse::from_value`], which also accepts untagged
/// detail payloads from older contract variants.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GenerationResponse {
    Candidates { candidates: Vec<CandidateRecord> },
    Detail(DetailRecord),
}

impl GenerationResponse {
    /// Discriminates a backend payload on its `type` field. A missing tag
    /// means the detail shape.
    pub fn from_value(value: Value) -> Result<Self, ShapeError> {
        let tag = match value.get("type") {
            Some(tag) => Some(tag.as_str().ok_or(ShapeError::InvalidTag)?.to_owned()),
            None => None,
        };

        match tag.as_deref() {
            Some("candidates") => {
                let candidates = value
                    .get("candidates")
                    .cloned()
                    .ok_or(ShapeError::MissingField("candidates"))?;
                let candidates: Vec<CandidateRecord> = serde_json::from_value(candidates)
                    .map_err(|e| ShapeError::Invalid(e.to_string()))?;
                Ok(Self::Candidates { candidates })
            }
            Some("detail") | None => DetailRecord::from_value(value).map(Self::Detail),
            Some(other) => Err(ShapeError::UnknownType(other.to_owned())),
        }
    }

    /// Structural checks the prompt contract promises but serde cannot
    /// express.
    pub fn validate(&self) -> Result<(), ShapeError> {
        match self {
            Self::Candidates { candidates } => {
                if candidates.is_empty() {
                    return Err(ShapeError::Invalid("empty candidate list".to_owned()));
                }
                for candidate in candidates {
                    if candidate.zh.is_empty() {
                        return Err(ShapeError::MissingField("zh"));
                    }
                    if !(1..=3).contains(&candidate.recommendation) {
                        return Err(ShapeError::Invalid(format!(
                            "recommendation {} out of range for {}",
                            candidate.recommendation, candidate.zh
                        )));
                    }
                }
                Ok(())
            }
            Self::Detail(detail) => {
                if detail.word.is_empty() {
                    return Err(ShapeError::MissingField("word"));
                }
                Ok(())
            }
        }
    }
}

impl DetailRecord {
    /// Accepts both the current meanings-based shape and the historical
    /// top-level `definitions` shape, upgrading the latter.
    pub fn from_value(value: Value) -> Result<Self, ShapeError> {
        let Some(fields) = value.as_object() else {
            return Err(ShapeError::NotAnObject);
        };

        let record: Self = if fields.contains_key("definitions") && !fields.contains_key("meanings")
        {
            let legacy: LegacyDetail =
                serde_json::from_value(value).map_err(|e| ShapeError::Invalid(e.to_string()))?;
            legacy.upgrade()
        } else {
            serde_json::from_value(value).map_err(|e| ShapeError::Invalid(e.to_string()))?
        };

        if record.word.is_empty() {
            return Err(ShapeError::MissingField("word"));
        }

        Ok(record)
    }
}

/// Detail shape used before meanings were introduced; only ever read back
/// from historical saved rows.
#[derive(Deserialize)]
struct LegacyDetail {
    #[serde(default)]
    word: String,
    #[serde(default)]
    pinyin: String,
    #[serde(default)]
    definitions: LegacyDefinitions,
    #[serde(default)]
    part_of_speech: String,
    #[serde(default)]
    examples: Vec<Example>,
    #[serde(default)]
    synonyms: Vec<Synonym>,
    #[serde(default)]
    usage_tips: String,
    #[serde(default)]
    summary: Vec<String>,
}

#[derive(Default, Deserialize)]
struct LegacyDefinitions {
    #[serde(default)]
    original: String,
    #[serde(default)]
    derived: String,
    #[serde(default)]
    context: String,
}

impl LegacyDetail {
    fn upgrade(self) -> DetailRecord {
        let definition = if self.definitions.context.is_empty() {
            self.definitions.derived
        } else {
            format!("{}（{}）", self.definitions.derived, self.definitions.context)
        };

        DetailRecord {
            word: self.word,
            pinyin: self.pinyin,
            meanings: vec![Meaning {
                part_of_speech: self.part_of_speech,
                short_definition: self.definitions.original,
                definition,
                examples: self.examples,
            }],
            synonyms: self.synonyms,
            usage_tips: self.usage_tips,
            summary: self.summary,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ShapeError {
    #[error("payload is not a JSON object")]
    NotAnObject,

    #[error("`type` field is not a string")]
    InvalidTag,

    #[error("unknown response type: {0}")]
    UnknownType(String),

    #[error("missing field: {0}")]
    MissingField(&'static str),

    #[error("malformed payload: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn candidates_payload() -> Value {
        json!({
            "type": "candidates",
            "candidates": [
                { "zh": "肩膀酸痛", "pinyin": "jiānbǎng suāntòng",
                  "jp_meaning": "肩こり", "usage": "口", "recommendation": 1 },
                { "zh": "肩周炎", "pinyin": "jiānzhōuyán",
                  "jp_meaning": "五十肩", "usage": "書", "recommendation": 3 }
            ]
        })
    }

    #[test]
    fn discriminates_on_the_type_tag() {
        let response = GenerationResponse::from_value(candidates_payload()).unwrap();
        match response {
            GenerationResponse::Candidates { candidates } => {
                assert_eq!(candidates.len(), 2);
                assert_eq!(candidates[0].usage, UsageRegister::Spoken);
            }
            GenerationResponse::Detail(_) => panic!("parsed as detail"),
        }
    }

    #[test]
    fn untagged_payload_falls_back_to_detail() {
        let response = GenerationResponse::from_value(json!({
            "word": "谢谢",
            "pinyin": "xièxie",
            "meanings": [{ "part_of_speech": "動詞", "short_definition": "感謝する",
                           "definition": "お礼を言う", "examples": [] }]
        }))
        .unwrap();

        match response {
            GenerationResponse::Detail(detail) => assert_eq!(detail.word, "谢谢"),
            GenerationResponse::Candidates { .. } => panic!("parsed as candidates"),
        }
    }

    #[test]
    fn tagged_detail_is_accepted() {
        let response = GenerationResponse::from_value(json!({
            "type": "detail",
            "word": "加班",
            "meanings": []
        }))
        .unwrap();
        assert!(matches!(response, GenerationResponse::Detail(d) if d.word == "加班"));
    }

    #[test]
    fn unknown_type_is_rejected() {
        let err = GenerationResponse::from_value(json!({ "type": "poem", "word": "山" }))
            .unwrap_err();
        assert!(matches!(err, ShapeError::UnknownType(t) if t == "poem"));
    }

    #[test]
    fn detail_without_word_is_rejected() {
        let err = GenerationResponse::from_value(json!({ "pinyin": "ma" })).unwrap_err();
        assert!(matches!(err, ShapeError::MissingField("word")));
    }

    #[test]
    fn serialization_carries_the_type_tag() {
        let detail = GenerationResponse::Detail(DetailRecord {
            word: "谢谢".to_owned(),
            pinyin: "xièxie".to_owned(),
            meanings: vec![],
            synonyms: vec![],
            usage_tips: String::new(),
            summary: vec![],
        });
        let value = serde_json::to_value(&detail).unwrap();
        assert_eq!(value["type"], "detail");
        assert_eq!(value["word"], "谢谢");

        let value = serde_json::to_value(
            GenerationResponse::from_value(candidates_payload()).unwrap(),
        )
        .unwrap();
        assert_eq!(value["type"], "candidates");
        assert_eq!(value["candidates"][1]["usage"], "書");
    }

    #[test]
    fn legacy_definitions_upgrade_into_one_meaning() {
        let detail = DetailRecord::from_value(json!({
            "word": "把握",
            "pinyin": "bǎwò",
            "part_of_speech": "動詞/名詞",
            "definitions": {
                "original": "握る",
                "derived": "確信・自信",
                "context": "ビジネスでは見通しの意"
            },
            "examples": [
                { "scenario": "会議", "zh": "我有把握。", "jp": "自信があります。" }
            ],
            "synonyms": [{ "word": "信心", "pinyin": "xìnxīn", "nuance": "心理的な自信" }],
            "usage_tips": "成功の見込みに使う",
            "summary": ["ビジネス", "頻出"]
        }))
        .unwrap();

        assert_eq!(detail.meanings.len(), 1);
        let meaning = &detail.meanings[0];
        assert_eq!(meaning.part_of_speech, "動詞/名詞");
        assert_eq!(meaning.short_definition, "握る");
        assert_eq!(meaning.definition, "確信・自信（ビジネスでは見通しの意）");
        assert_eq!(meaning.examples.len(), 1);
        assert_eq!(detail.synonyms[0].word, "信心");
        assert_eq!(detail.summary, vec!["ビジネス", "頻出"]);
    }

    #[test]
    fn current_shape_is_not_rewritten() {
        let payload = json!({
            "word": "开会",
            "pinyin": "kāihuì",
            "meanings": [
                { "part_of_speech": "動詞", "short_definition": "会議をする",
                  "definition": "会議を開く", "examples": [
                      { "scenario": "職場", "zh": "我们开会吧。", "jp": "会議を始めましょう。" },
                      { "scenario": "電話", "zh": "他在开会。", "jp": "彼は会議中です。",
                        "note": "進行中の動作" }
                  ] }
            ],
            "synonyms": [],
            "usage_tips": "",
            "summary": []
        });
        let detail = DetailRecord::from_value(payload).unwrap();
        assert_eq!(detail.meanings[0].examples.len(), 2);
        assert_eq!(
            detail.meanings[0].examples[1].note.as_deref(),
            Some("進行中の動作")
        );
    }

    #[test]
    fn validate_rejects_out_of_range_recommendation() {
        let mut payload = candidates_payload();
        payload["candidates"][0]["recommendation"] = json!(5);
        let response = GenerationResponse::from_value(payload).unwrap();
        assert!(response.validate().is_err());

        let response = GenerationResponse::from_value(candidates_payload()).unwrap();
        assert!(response.validate().is_ok());
    }

    #[test]
    fn validate_rejects_an_empty_candidate_list() {
        let response =
            GenerationResponse::from_value(json!({ "type": "candidates", "candidates": [] }))
                .unwrap();
        assert!(response.validate().is_err());
    }
}
