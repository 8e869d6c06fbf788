//! Korean prompt templates for the hosted model.
//!
//! Every template pins the reply contract by example: the model is shown the
//! exact JSON shape it must return and told to answer with JSON only. Replies
//! still arrive wrapped in prose or fences often enough that extraction
//! remains necessary.

use super::analysis::AnalysisKind;

/// Builds the generation prompt for one analysis of `user_text`.
pub fn build_prompt(kind: AnalysisKind, user_text: &str) -> String {
    match kind {
        AnalysisKind::DepartmentReferral => format!(
            r#"다음 문장을 보고 적절한 진료과 1~2개를 JSON 형식으로 출력해줘.
문장: "{user_text}"
출력 형식:
{{
  "진료과": ["내과", "신경과"]
}}
반드시 위와 같은 JSON만 출력하고 코드블럭 없이 출력해줘.
"#
        ),
        AnalysisKind::SymptomSummary => format!(
            r#"다음 문장을 보고 주요 증상 목록과 설명을 JSON으로 출력해줘.
형식:
{{
  "증상": [
    {{"이름": "두통", "설명": "머리가 아픈 증상입니다."}},
    {{"이름": "구토", "설명": "음식을 토해내는 증상입니다."}}
  ]
}}
문장: "{user_text}"
코드블록 없이 JSON만 출력해줘. 설명 없이.
"#
        ),
        AnalysisKind::RelatedConditions => format!(
            r#"다음 증상에서 관련 질환 1~2개와 설명을 JSON으로 출력해줘.
형식:
{{"관련 질환": [{{"이름": "편두통", "설명": "일측성 두통으로 메스꺼움이 함께 나타나요."}}]}}
문장: "{user_text}"
JSON만 출력하고 설명하지 마.
"#
        ),
        AnalysisKind::UrgencyAssessment => format!(
            r#"다음 문장을 보고 적절한 진료과 1~2개, 증상 이름 및 설명, 관련 질환, 응급도를 JSON 형식으로 출력해줘.
문장: "{user_text}"
형식:
{{
  "진료과": ["내과", "신경과"],
  "증상": [
    {{ "이름": "두통", "설명": "머리가 아프고 무거운 느낌이 드는 증상입니다." }},
    {{ "이름": "미식거림", "설명": "속이 울렁거리고 구역질이 날 것 같은 느낌이에요." }}
  ],
  "관련 질환": [
    {{ "이름": "편두통", "설명": "일측성 두통으로 메스꺼움과 빛 예민 증상이 함께 나타나요." }}
  ],
  "응급도": "중간 - 빠른 진료 권장"
}}
JSON만 출력해줘. 설명/코드블럭 없이.
"#
        ),
    }
}
