use chrono::{TimeZone, Utc};
use keireki::core::errors::AppError;
use keireki::core::types::TimeStats;
use keireki::db::repositories::records::{get_record, insert_record, list_records, NewRecord};
use keireki::db::Database;
use keireki::schema::{
    Certification, Gender, Grade, PersonalInfo, ProcessPhase, ResumeRecord, Role, SkillDetail,
    SkillEvaluation, SkillMap, WorkHistoryEntry,
};

fn sample_record() -> ResumeRecord {
    let mut languages = SkillMap::new();
    languages.insert(
        "Java".to_string(),
        SkillDetail {
            grade: Grade::A,
            years: Some("10年".to_string()),
        },
    );

    ResumeRecord {
        personal: Some(PersonalInfo {
            name: Some("山田 太郎".to_string()),
            age: Some(35),
            gender: Some(Gender::Male),
            ..PersonalInfo::default()
        }),
        certifications: Some(vec![Certification {
            name: Some("基本情報技術者".to_string()),
            year: Some(2015),
            month: Some(4),
        }]),
        work_history: Some(vec![WorkHistoryEntry {
            company: Some("ABC株式会社".to_string()),
            period_start: Some("2020/01/01".to_string()),
            period_end: Some("2021/06/30".to_string()),
            duties: Some("基幹システムの保守開発".to_string()),
            role: Some(Role::Leader),
            phases: Some(vec![ProcessPhase::RequirementsDefinition, ProcessPhase::Testing]),
            ..WorkHistoryEntry::default()
        }]),
        skill_evaluation: Some(SkillEvaluation {
            languages: Some(languages),
            ..SkillEvaluation::default()
        }),
        ..ResumeRecord::default()
    }
}

#[tokio::test]
async fn insert_and_get_round_trip() {
    let db = Database::in_memory().await.expect("db should initialize");
    let record = sample_record();
    let stats = TimeStats {
        pdf_parse_time: 0.42,
        total_inference_time: 3.5,
        total_time: 4.1,
    };
    let created_at = Utc.with_ymd_and_hms(2024, 4, 1, 12, 0, 0).unwrap();

    let id = insert_record(
        db.pool(),
        NewRecord {
            unique_id: "山田_太郎_1711929600",
            file_name: "山田 太郎.pdf",
            record: &record,
            time_stats: &stats,
            created_at,
        },
    )
    .await
    .expect("insert should succeed");

    uuid::Uuid::parse_str(&id).expect("row key should be a uuid");

    let stored = get_record(db.pool(), &id).await.expect("record should exist");
    assert_eq!(stored.id, id);
    assert_eq!(stored.unique_id, "山田_太郎_1711929600");
    assert_eq!(stored.file_name, "山田 太郎.pdf");
    assert_eq!(stored.llm_output, record);
    assert_eq!(stored.time_stats, stats);
    assert_eq!(stored.created_at, created_at);
}

#[tokio::test]
async fn get_missing_record_is_not_found() {
    let db = Database::in_memory().await.expect("db should initialize");

    let err = get_record(db.pool(), "no-such-id")
        .await
        .expect_err("unknown id should fail");
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn list_returns_newest_first() {
    let db = Database::in_memory().await.expect("db should initialize");
    let record = sample_record();
    let stats = TimeStats::default();

    // Inserted out of chronological order on purpose.
    for (unique_id, month) in [("jan", 1), ("mar", 3), ("feb", 2)] {
        insert_record(
            db.pool(),
            NewRecord {
                unique_id,
                file_name: "resume.pdf",
                record: &record,
                time_stats: &stats,
                created_at: Utc.with_ymd_and_hms(2024, month, 1, 0, 0, 0).unwrap(),
            },
        )
        .await
        .expect("insert should succeed");
    }

    let listed = list_records(db.pool()).await.expect("list should succeed");
    let order: Vec<&str> = listed.iter().map(|r| r.unique_id.as_str()).collect();
    assert_eq!(order, vec!["mar", "feb", "jan"]);
}

#[tokio::test]
async fn identical_timestamps_keep_a_stable_order() {
    let db = Database::in_memory().await.expect("db should initialize");
    let record = sample_record();
    let stats = TimeStats::default();
    let created_at = Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).unwrap();

    for unique_id in ["first", "second"] {
        insert_record(
            db.pool(),
            NewRecord {
                unique_id,
                file_name: "resume.pdf",
                record: &record,
                time_stats: &stats,
                created_at,
            },
        )
        .await
        .expect("insert should succeed");
    }

    let listed = list_records(db.pool()).await.expect("list should succeed");
    assert_eq!(listed.len(), 2);
    // Ties fall back to the row key, so repeat listings agree.
    assert!(listed[0].id < listed[1].id);
}

#[tokio::test]
async fn stored_payload_preserves_unset_sections() {
    let db = Database::in_memory().await.expect("db should initialize");
    let record = ResumeRecord {
        personal: Some(PersonalInfo {
            name: Some("佐藤 花子".to_string()),
            ..PersonalInfo::default()
        }),
        ..ResumeRecord::default()
    };
    let stats = TimeStats::default();

    let id = insert_record(
        db.pool(),
        NewRecord {
            unique_id: "佐藤_花子_1711929600",
            file_name: "佐藤.xlsx",
            record: &record,
            time_stats: &stats,
            created_at: Utc::now(),
        },
    )
    .await
    .expect("insert should succeed");

    let stored = get_record(db.pool(), &id).await.expect("record should exist");
    assert!(stored.llm_output.desired.is_none());
    assert!(stored.llm_output.certifications.is_none());
    assert!(stored.llm_output.work_history.is_none());
    assert_eq!(stored.llm_output, record);
}
