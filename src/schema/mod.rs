//! Typed résumé record.
//!
//! Wire keys and enum literals are the Japanese vocabulary of the
//! source documents; everything else is English. Serialization and
//! deserialization share these declarations, so the wire form is
//! canonical in both directions, and the same declarations derive the
//! JSON schema sent to the completion endpoint. Enumerated fields
//! reject out-of-domain values at the deserialization boundary;
//! nothing is coerced or defaulted.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ── Enumerated domains ───────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Gender {
    #[serde(rename = "男性")]
    Male,
    #[serde(rename = "女性")]
    Female,
    #[serde(rename = "その他")]
    Other,
    #[serde(rename = "回答しない")]
    NoAnswer,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "男性",
            Self::Female => "女性",
            Self::Other => "その他",
            Self::NoAnswer => "回答しない",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Education {
    #[serde(rename = "高等学校")]
    HighSchool,
    #[serde(rename = "学士")]
    Bachelor,
    #[serde(rename = "修士")]
    Master,
    #[serde(rename = "博士")]
    Doctorate,
    #[serde(rename = "その他")]
    Other,
}

impl Education {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HighSchool => "高等学校",
            Self::Bachelor => "学士",
            Self::Master => "修士",
            Self::Doctorate => "博士",
            Self::Other => "その他",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Region {
    #[serde(rename = "関東")]
    Kanto,
    #[serde(rename = "関西")]
    Kansai,
    #[serde(rename = "東海")]
    Tokai,
    #[serde(rename = "中部")]
    Chubu,
    #[serde(rename = "九州")]
    Kyushu,
    #[serde(rename = "中国")]
    Chugoku,
    #[serde(rename = "東北")]
    Tohoku,
    #[serde(rename = "北信越")]
    Hokushinetsu,
}

impl Region {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Kanto => "関東",
            Self::Kansai => "関西",
            Self::Tokai => "東海",
            Self::Chubu => "中部",
            Self::Kyushu => "九州",
            Self::Chugoku => "中国",
            Self::Tohoku => "東北",
            Self::Hokushinetsu => "北信越",
        }
    }
}

/// Shared two-value domain for holiday-work and travel availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Negotiability {
    #[serde(rename = "相談可")]
    Negotiable,
    #[serde(rename = "不可")]
    Declined,
}

impl Negotiability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Negotiable => "相談可",
            Self::Declined => "不可",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum MonthlyHours {
    #[serde(rename = "相談可")]
    Negotiable,
    #[serde(rename = "不可")]
    Declined,
    #[serde(rename = "180h以内")]
    Within180,
    #[serde(rename = "200h以内")]
    Within200,
}

impl MonthlyHours {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Negotiable => "相談可",
            Self::Declined => "不可",
            Self::Within180 => "180h以内",
            Self::Within200 => "200h以内",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Role {
    #[serde(rename = "メンバー")]
    Member,
    #[serde(rename = "リーダー")]
    Leader,
    #[serde(rename = "マネージャー")]
    Manager,
    #[serde(rename = "PM")]
    Pm,
    #[serde(rename = "PMO")]
    Pmo,
    #[serde(rename = "PdM")]
    Pdm,
    #[serde(rename = "PO")]
    Po,
    #[serde(rename = "テックリード")]
    TechLead,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Member => "メンバー",
            Self::Leader => "リーダー",
            Self::Manager => "マネージャー",
            Self::Pm => "PM",
            Self::Pmo => "PMO",
            Self::Pdm => "PdM",
            Self::Po => "PO",
            Self::TechLead => "テックリード",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum TeamSize {
    #[serde(rename = "1～5名")]
    UpToFive,
    #[serde(rename = "6～10名")]
    SixToTen,
    #[serde(rename = "11～50名")]
    ElevenToFifty,
    #[serde(rename = "51名～99名")]
    FiftyOneToNinetyNine,
    #[serde(rename = "100名以上")]
    HundredOrMore,
}

impl TeamSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UpToFive => "1～5名",
            Self::SixToTen => "6～10名",
            Self::ElevenToFifty => "11～50名",
            Self::FiftyOneToNinetyNine => "51名～99名",
            Self::HundredOrMore => "100名以上",
        }
    }
}

/// Development process phases, in the fixed order the workbook's
/// checkbox grid uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum ProcessPhase {
    #[serde(rename = "要件定義")]
    RequirementsDefinition,
    #[serde(rename = "基本設計")]
    BasicDesign,
    #[serde(rename = "詳細設計")]
    DetailedDesign,
    #[serde(rename = "製造・実装")]
    Implementation,
    #[serde(rename = "テスト")]
    Testing,
    #[serde(rename = "保守・運用")]
    Maintenance,
}

impl ProcessPhase {
    pub const ALL: [ProcessPhase; 6] = [
        Self::RequirementsDefinition,
        Self::BasicDesign,
        Self::DetailedDesign,
        Self::Implementation,
        Self::Testing,
        Self::Maintenance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RequirementsDefinition => "要件定義",
            Self::BasicDesign => "基本設計",
            Self::DetailedDesign => "詳細設計",
            Self::Implementation => "製造・実装",
            Self::Testing => "テスト",
            Self::Maintenance => "保守・運用",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Grade {
    A,
    B,
    C,
    D,
    E,
}

impl Grade {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
        }
    }
}

// ── Sections ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[schemars(description = "候補者の基本個人情報。年齢は生年月日から算出可能な場合のみ出力。")]
pub struct PersonalInfo {
    #[serde(rename = "氏名", skip_serializing_if = "Option::is_none")]
    #[schemars(description = "候補者のフルネーム。姓と名の間に半角スペースを含める。")]
    pub name: Option<String>,
    #[serde(rename = "作成日", skip_serializing_if = "Option::is_none")]
    #[schemars(description = "履歴書の更新日。YY/MM/DD 形式で表記。")]
    pub created_on: Option<String>,
    #[serde(rename = "年齢", skip_serializing_if = "Option::is_none")]
    #[schemars(description = "候補者の満年齢。生年月日が履歴書に記載されている場合のみ算出可能。")]
    pub age: Option<u32>,
    #[serde(rename = "性別", skip_serializing_if = "Option::is_none")]
    #[schemars(description = "候補者の性別（提供されている場合のみ）。")]
    pub gender: Option<Gender>,
    #[serde(rename = "国籍", skip_serializing_if = "Option::is_none")]
    #[schemars(description = "候補者の国籍。履歴書に記載がある場合のみ出力。")]
    pub nationality: Option<String>,
    #[serde(rename = "最寄駅", skip_serializing_if = "Option::is_none")]
    #[schemars(description = "最寄り駅の路線名と駅名。半角スペースで区切る。")]
    pub nearest_station: Option<String>,
    #[serde(rename = "最終学歴", skip_serializing_if = "Option::is_none")]
    #[schemars(description = "候補者の最終学歴の分類。")]
    pub education: Option<Education>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[schemars(description = "候補者の希望する勤務条件。履歴書に記載されている場合のみ出力。")]
pub struct DesiredConditions {
    #[serde(rename = "参画可能時期", skip_serializing_if = "Option::is_none")]
    #[schemars(description = "参画可能となる時期（YYYY-MM-DD 形式の日付、または記載通りの文字列）。")]
    pub available_from: Option<String>,
    #[serde(rename = "希望地域", skip_serializing_if = "Option::is_none")]
    #[schemars(description = "希望する勤務地。")]
    pub region: Option<Region>,
    #[serde(rename = "休日作業可否", skip_serializing_if = "Option::is_none")]
    #[schemars(description = "休日勤務の可否。")]
    pub holiday_work: Option<Negotiability>,
    #[serde(rename = "稼働範囲", skip_serializing_if = "Option::is_none")]
    #[schemars(description = "月間の総労働時間の希望。")]
    pub monthly_hours: Option<MonthlyHours>,
    #[serde(rename = "出張可否", skip_serializing_if = "Option::is_none")]
    #[schemars(description = "出張が可能かどうか。")]
    pub travel: Option<Negotiability>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[schemars(description = "候補者が取得した資格・認定情報。複数資格がある場合はリスト形式。")]
pub struct Certification {
    #[serde(rename = "資格名", skip_serializing_if = "Option::is_none")]
    #[schemars(description = "資格の正式名称。")]
    pub name: Option<String>,
    #[serde(rename = "年", skip_serializing_if = "Option::is_none")]
    #[schemars(description = "資格を取得した年。")]
    pub year: Option<i32>,
    #[serde(
        rename = "月",
        default,
        deserialize_with = "deserialize_month",
        skip_serializing_if = "Option::is_none"
    )]
    #[schemars(description = "資格を取得した月（1〜12）。", range(min = 1, max = 12))]
    pub month: Option<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SkillSummary {
    #[serde(rename = "自己PR", skip_serializing_if = "Option::is_none")]
    #[schemars(description = "自己PRセクションのすべてを表示する。")]
    pub self_pr: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[schemars(description = "候補者の職務経歴の詳細。履歴書に記載された情報のみ含める。")]
pub struct WorkHistoryEntry {
    #[serde(rename = "会社名", skip_serializing_if = "Option::is_none")]
    #[schemars(description = "勤務していた会社名。")]
    pub company: Option<String>,
    #[serde(rename = "事業内容", skip_serializing_if = "Option::is_none")]
    #[schemars(description = "会社名の直後の「事業内容:」フィールドの正確な値。")]
    pub business_description: Option<String>,
    #[serde(rename = "期間開始", skip_serializing_if = "Option::is_none")]
    #[schemars(description = "勤務開始日（YYYY/MM/DD 形式）。")]
    pub period_start: Option<String>,
    #[serde(rename = "期間終了", skip_serializing_if = "Option::is_none")]
    #[schemars(description = "勤務終了日（YYYY/MM/DD 形式）または「現在」。")]
    pub period_end: Option<String>,
    #[serde(rename = "プロジェクト名", skip_serializing_if = "Option::is_none")]
    #[schemars(description = "プロジェクトの名前またはタイトル（履歴書に記載されている場合のみ出力）。")]
    pub project_name: Option<String>,
    #[serde(rename = "業務内容", skip_serializing_if = "Option::is_none")]
    #[schemars(description = "業務内容の簡潔な技術的説明のみ。チームや役割への言及を除く。")]
    pub duties: Option<String>,
    #[serde(rename = "使用言語", skip_serializing_if = "Option::is_none")]
    #[schemars(description = "プロジェクトで使用されたプログラミング言語とライブラリのリスト。")]
    pub languages: Option<Vec<String>>,
    #[serde(rename = "サーバOS", skip_serializing_if = "Option::is_none")]
    #[schemars(description = "サーバー技術、オペレーティングシステム、データベースのリスト。")]
    pub server_os: Option<Vec<String>>,
    #[serde(rename = "ツールなど", skip_serializing_if = "Option::is_none")]
    #[schemars(description = "プロジェクトで使用したツール・ミドルウェア（履歴書の記載通り）。")]
    pub tools: Option<Vec<String>>,
    #[serde(rename = "役割", skip_serializing_if = "Option::is_none")]
    #[schemars(description = "候補者のプロジェクトにおける主な役割。")]
    pub role: Option<Role>,
    #[serde(rename = "規模", skip_serializing_if = "Option::is_none")]
    #[schemars(description = "「チーム: X名」などから抽出したチームの人数帯。")]
    pub team_size: Option<TeamSize>,
    #[serde(rename = "担当工程", skip_serializing_if = "Option::is_none")]
    #[schemars(description = "プロジェクト中に候補者が担当した工程の一覧。")]
    pub phases: Option<Vec<ProcessPhase>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SkillDetail {
    #[serde(rename = "評価")]
    pub grade: Grade,
    #[serde(rename = "年", skip_serializing_if = "Option::is_none")]
    #[schemars(description = "経験年数（例: 「5年」）。")]
    pub years: Option<String>,
}

/// Skill-name → detail maps. `BTreeMap` keeps iteration (and thus the
/// rendered workbook) deterministic for a given record.
pub type SkillMap = BTreeMap<String, SkillDetail>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[schemars(description = "候補者の技術スキルをA〜Eで評価するセクション。")]
pub struct SkillEvaluation {
    #[serde(rename = "業務範囲", skip_serializing_if = "Option::is_none")]
    #[schemars(description = "業務範囲（企画提案、要件定義など）の評価と経験年数。")]
    pub business_scope: Option<SkillMap>,
    #[serde(rename = "OS", skip_serializing_if = "Option::is_none")]
    #[schemars(description = "使用経験のあるオペレーティングシステムの評価と経験年数。")]
    pub os: Option<SkillMap>,
    #[serde(rename = "言語", skip_serializing_if = "Option::is_none")]
    #[schemars(description = "プログラミング言語の評価と経験年数。")]
    pub languages: Option<SkillMap>,
    #[serde(rename = "データベース", skip_serializing_if = "Option::is_none")]
    #[schemars(description = "データベースの評価と経験年数。")]
    pub databases: Option<SkillMap>,
    #[serde(rename = "フレームワーク評価", skip_serializing_if = "Option::is_none")]
    #[schemars(description = "フレームワークやライブラリの評価と経験年数。")]
    pub frameworks: Option<SkillMap>,
    #[serde(rename = "クラウドサービス", skip_serializing_if = "Option::is_none")]
    #[schemars(description = "クラウドサービスや監視ツールの評価と経験年数。")]
    pub cloud_services: Option<SkillMap>,
    #[serde(rename = "crm", skip_serializing_if = "Option::is_none")]
    #[schemars(description = "CRMプラットフォームの評価と経験年数。")]
    pub crm: Option<SkillMap>,
}

impl SkillEvaluation {
    /// Categories in declared order with their wire labels; only the
    /// populated ones. The workbook packs its columns in this order.
    pub fn populated_categories(&self) -> Vec<(&'static str, &SkillMap)> {
        let all: [(&'static str, &Option<SkillMap>); 7] = [
            ("業務範囲", &self.business_scope),
            ("OS", &self.os),
            ("言語", &self.languages),
            ("データベース", &self.databases),
            ("フレームワーク評価", &self.frameworks),
            ("クラウドサービス", &self.cloud_services),
            ("crm", &self.crm),
        ];
        all.into_iter()
            .filter_map(|(label, map)| match map {
                Some(skills) if !skills.is_empty() => Some((label, skills)),
                _ => None,
            })
            .collect()
    }
}

// ── Record ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[schemars(
    description = "日本の履歴書の標準スキーマ。履歴書に記載された情報のみを含め、欠落している情報は出力しない。"
)]
pub struct ResumeRecord {
    #[serde(rename = "個人的", skip_serializing_if = "Option::is_none")]
    pub personal: Option<PersonalInfo>,
    #[serde(rename = "望ましい", skip_serializing_if = "Option::is_none")]
    pub desired: Option<DesiredConditions>,
    #[serde(rename = "資格_", skip_serializing_if = "Option::is_none")]
    #[schemars(description = "取得資格のリスト。資格がないと明記されている場合は空リスト。")]
    pub certifications: Option<Vec<Certification>>,
    #[serde(rename = "スキルサマリー", skip_serializing_if = "Option::is_none")]
    pub skill_summary: Option<SkillSummary>,
    #[serde(rename = "職歴", skip_serializing_if = "Option::is_none")]
    pub work_history: Option<Vec<WorkHistoryEntry>>,
    #[serde(rename = "スキル評価", skip_serializing_if = "Option::is_none")]
    pub skill_evaluation: Option<SkillEvaluation>,
}

/// The schema descriptor the completion endpoint constrains its output
/// against, as a JSON value.
pub fn response_schema() -> serde_json::Value {
    schemars::schema_for!(ResumeRecord).to_value()
}

fn deserialize_month<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let month = Option::<u8>::deserialize(deserializer)?;
    if let Some(value) = month {
        if !(1..=12).contains(&value) {
            return Err(serde::de::Error::custom(format!(
                "month out of range: {value}"
            )));
        }
    }
    Ok(month)
}
