use keireki::schema::{
    response_schema, Gender, Grade, MonthlyHours, ProcessPhase, ResumeRecord, Role, TeamSize,
};
use serde_json::json;

fn wire_record() -> serde_json::Value {
    json!({
        "個人的": {
            "氏名": "山田 太郎",
            "作成日": "24/04/01",
            "年齢": 35,
            "性別": "男性",
            "最終学歴": "学士"
        },
        "望ましい": {
            "参画可能時期": "2024-07-01",
            "希望地域": "関東",
            "休日作業可否": "相談可",
            "稼働範囲": "180h以内",
            "出張可否": "不可"
        },
        "資格_": [
            {"資格名": "基本情報技術者", "年": 2015, "月": 4}
        ],
        "スキルサマリー": {"自己PR": "設計から運用まで一貫して担当できます。"},
        "職歴": [
            {
                "会社名": "ABC株式会社",
                "期間開始": "2020/01/01",
                "期間終了": "2021/06/30",
                "業務内容": "基幹システムの保守開発",
                "使用言語": ["Java", "SQL"],
                "役割": "リーダー",
                "規模": "6～10名",
                "担当工程": ["要件定義", "テスト"]
            }
        ],
        "スキル評価": {
            "言語": {"Java": {"評価": "A", "年": "10年"}},
            "業務範囲": {"要件定義": {"評価": "B"}}
        }
    })
}

#[test]
fn wire_json_round_trips_through_typed_record() {
    let wire = wire_record();
    let record: ResumeRecord =
        serde_json::from_value(wire.clone()).expect("wire record should deserialize");

    let personal = record.personal.as_ref().expect("personal section");
    assert_eq!(personal.name.as_deref(), Some("山田 太郎"));
    assert_eq!(personal.age, Some(35));
    assert_eq!(personal.gender, Some(Gender::Male));

    let desired = record.desired.as_ref().expect("desired section");
    assert_eq!(desired.monthly_hours, Some(MonthlyHours::Within180));

    let history = record.work_history.as_ref().expect("work history");
    assert_eq!(history[0].role, Some(Role::Leader));
    assert_eq!(history[0].team_size, Some(TeamSize::SixToTen));
    assert_eq!(
        history[0].phases,
        Some(vec![ProcessPhase::RequirementsDefinition, ProcessPhase::Testing])
    );

    let evaluation = record.skill_evaluation.as_ref().expect("skill evaluation");
    let languages = evaluation.languages.as_ref().expect("language map");
    assert_eq!(languages["Java"].grade, Grade::A);
    assert_eq!(languages["Java"].years.as_deref(), Some("10年"));

    let back = serde_json::to_value(&record).expect("record should serialize");
    assert_eq!(back, wire);
}

#[test]
fn values_outside_the_closed_domains_are_rejected() {
    let bad_gender = json!({"個人的": {"性別": "不明"}});
    assert!(serde_json::from_value::<ResumeRecord>(bad_gender).is_err());

    let bad_team_size = json!({"職歴": [{"規模": "3名"}]});
    assert!(serde_json::from_value::<ResumeRecord>(bad_team_size).is_err());

    let bad_phase = json!({"職歴": [{"担当工程": ["検収"]}]});
    assert!(serde_json::from_value::<ResumeRecord>(bad_phase).is_err());

    let bad_grade = json!({"スキル評価": {"言語": {"Java": {"評価": "F"}}}});
    assert!(serde_json::from_value::<ResumeRecord>(bad_grade).is_err());
}

#[test]
fn certification_month_must_be_a_calendar_month() {
    for month in [0, 13] {
        let wire = json!({"資格_": [{"資格名": "簿記", "月": month}]});
        assert!(
            serde_json::from_value::<ResumeRecord>(wire).is_err(),
            "month {month} should be rejected"
        );
    }

    let wire = json!({"資格_": [{"資格名": "簿記", "月": 12}]});
    let record: ResumeRecord = serde_json::from_value(wire).expect("month 12 is valid");
    let certs = record.certifications.expect("certifications");
    assert_eq!(certs[0].month, Some(12));
}

#[test]
fn absent_sections_are_not_invented() {
    let empty: ResumeRecord = serde_json::from_value(json!({})).expect("empty record");
    assert_eq!(empty, ResumeRecord::default());
    assert_eq!(
        serde_json::to_value(&empty).expect("serialize"),
        json!({})
    );

    let only_name = json!({"個人的": {"氏名": "佐藤 花子"}});
    let record: ResumeRecord =
        serde_json::from_value(only_name.clone()).expect("partial record");
    assert_eq!(
        serde_json::to_value(&record).expect("serialize"),
        only_name
    );
}

#[test]
fn explicit_empty_certification_list_survives() {
    // 「資格なし」 maps to an empty list, which is distinct from the
    // section being absent.
    let wire = json!({"資格_": []});
    let record: ResumeRecord = serde_json::from_value(wire.clone()).expect("deserialize");
    assert_eq!(record.certifications, Some(Vec::new()));
    assert_eq!(serde_json::to_value(&record).expect("serialize"), wire);
}

#[test]
fn response_schema_describes_every_section() {
    let schema = response_schema();
    let properties = schema
        .get("properties")
        .and_then(|p| p.as_object())
        .expect("schema should expose properties");

    for key in ["個人的", "望ましい", "資格_", "スキルサマリー", "職歴", "スキル評価"] {
        assert!(properties.contains_key(key), "missing section {key}");
    }
    assert!(
        schema.get("description").is_some(),
        "record description should reach the schema"
    );
}
