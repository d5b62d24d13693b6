use question_bank_tools::error::{AppError, ValidationError};
use question_bank_tools::models::load_question_batch;
use question_bank_tools::utils::logging;
use question_bank_tools::{
    BankStore, Config, MigrationFlow, MigrationRunner, QuestionRecord, VerificationRunner,
};
use std::fs;
use std::path::{Path, PathBuf};

const TEN_COLUMN_BANK: &str = "Q,O1,O2,O3,O4,Ans,Hint,Know,Link,Type\n\
Which is larger?,1/2,1/8,1/10,1/100,1/2,Think about sharing a pizza.,,,MCQ\n";

fn write_bank(dir: &Path, text: &str) -> PathBuf {
    let path = dir.join("questions.csv");
    fs::write(&path, text).unwrap();
    path
}

fn record(prompt: &str, answer: &str, difficulty: &str) -> QuestionRecord {
    QuestionRecord {
        prompt: prompt.to_string(),
        options: ["3/10".into(), "3/5".into(), "2/5".into(), "1/5".into()],
        answer: answer.to_string(),
        hint: "Add the numerators, keep the denominator.".to_string(),
        elaboration: "When denominators are the same, just add the top numbers.".to_string(),
        reference_link: "https://www.mathsisfun.com/fractions_addition.html".to_string(),
        kind: "MCQ".to_string(),
        difficulty: difficulty.to_string(),
    }
}

fn flow() -> MigrationFlow {
    MigrationFlow::new(&Config::default()).with_shared_fields("Fractions", "7")
}

#[test]
fn ten_column_bank_is_migrated_to_fifteen_columns() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_bank(dir.path(), TEN_COLUMN_BANK);

    let result = flow()
        .migrate(&path, &[record("1/5 + 2/5 = ?", "3/5", "Hard")], "Difficulty")
        .unwrap();
    assert_eq!(result.appended_rows, 1);
    assert_eq!(result.schema_width, 15);

    let table = BankStore::load(&path).unwrap();
    assert_eq!(table.header.len(), 15);
    assert_eq!(table.header[14], "Difficulty");
    assert_eq!(table.rows.len(), 2);

    let legacy = &table.rows[0];
    assert_eq!(legacy.len(), 15);
    assert_eq!(legacy[0], "Which is larger?");
    assert_eq!(legacy[6], "Think about sharing a pizza.");
    assert_eq!(legacy[9], "MCQ");
    assert!(legacy[10..14].iter().all(String::is_empty));
    assert_eq!(legacy[14], "Medium");

    let added = &table.rows[1];
    assert_eq!(added.len(), 15);
    assert_eq!(added[0], "1/5 + 2/5 = ?");
    assert_eq!(added[5], "3/5");
    assert_eq!(added[9], "");
    assert_eq!(added[10], "");
    assert_eq!(added[12], "Fractions");
    assert_eq!(added[13], "7");
    assert_eq!(added[14], "Hard");
}

#[test]
fn every_row_matches_header_width() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_bank(
        dir.path(),
        "Q,O1,O2,O3,O4,Ans,Hint,Know,Link,YT,Img,Type,Concept,Sheet\n\
         short,a\n\
         medium,a,b,c,d,a,h,k,l\n\
         full,a,b,c,d,a,h,k,l,y,i,MCQ,Fractions,7\n",
    );
    let questions: Vec<_> = (0..5)
        .map(|i| record(&format!("question {i}"), "2/5", "Medium"))
        .collect();

    flow().migrate(&path, &questions, "Difficulty").unwrap();

    let table = BankStore::load(&path).unwrap();
    assert_eq!(table.header.len(), 15);
    assert_eq!(table.rows.len(), 8);
    assert!(table.rows.iter().all(|row| row.len() == 15));
    // 原有内容不变，右侧补空后填默认难度
    assert_eq!(&table.rows[0][..2], &["short".to_string(), "a".to_string()]);
    assert!(table.rows[0][2..14].iter().all(String::is_empty));
    assert_eq!(table.rows[2][13], "7");
    assert!(table.rows[..3].iter().all(|row| row[14] == "Medium"));
}

#[test]
fn rerun_with_no_questions_changes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_bank(dir.path(), TEN_COLUMN_BANK);
    flow()
        .migrate(&path, &[record("1/5 + 2/5 = ?", "3/5", "Hard")], "Difficulty")
        .unwrap();
    let first = BankStore::load(&path).unwrap();

    let result = flow().migrate(&path, &[], "Difficulty").unwrap();
    let second = BankStore::load(&path).unwrap();

    assert!(!result.header_extended);
    assert_eq!(result.padded_rows, 0);
    assert_eq!(result.appended_rows, 0);
    assert_eq!(first, second);
    assert_eq!(second.header.iter().filter(|c| *c == "Difficulty").count(), 1);
}

#[test]
fn written_file_parses_back_to_same_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_bank(dir.path(), TEN_COLUMN_BANK);
    let tricky = QuestionRecord {
        prompt: "Jerry had $50. He spent 1/5 of it, on a \"toy\".\nHow much?".to_string(),
        options: ["$5".into(), "$10".into(), "$15".into(), "$20".into()],
        answer: "$10".to_string(),
        hint: "Divide 50 by 5.".to_string(),
        elaboration: String::new(),
        reference_link: String::new(),
        kind: "MCQ".to_string(),
        difficulty: "Hard".to_string(),
    };

    let mut expected = BankStore::load(&path).unwrap();
    flow()
        .apply(&mut expected, std::slice::from_ref(&tricky), "Difficulty")
        .unwrap();

    flow().migrate(&path, &[tricky], "Difficulty").unwrap();
    assert_eq!(BankStore::load(&path).unwrap(), expected);

    let text = fs::read_to_string(&path).unwrap();
    assert!(!text.contains("\n\n"));
}

#[test]
fn invalid_answer_aborts_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_bank(dir.path(), TEN_COLUMN_BANK);

    let questions = vec![
        record("1/5 + 2/5 = ?", "3/5", "Medium"),
        record("1/10 + 3/10 = ?", "4/10", "Medium"),
    ];
    let err = flow().migrate(&path, &questions, "Difficulty").unwrap_err();

    match err {
        AppError::Validation(ValidationError::AnswerNotInOptions { prompt, .. }) => {
            assert_eq!(prompt, "1/10 + 3/10 = ?");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(fs::read_to_string(&path).unwrap(), TEN_COLUMN_BANK);
}

#[test]
fn missing_bank_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.csv");
    let err = flow().migrate(&path, &[], "Difficulty").unwrap_err();
    assert!(err.is_not_found());
    assert!(!path.exists());
}

#[test]
fn malformed_bank_aborts_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let text = "Q,Ans\n\"never closed,1\n";
    let path = write_bank(dir.path(), text);
    let err = flow().migrate(&path, &[], "Difficulty").unwrap_err();
    assert!(err.is_parse());
    assert_eq!(fs::read_to_string(&path).unwrap(), text);
}

#[test]
fn bundled_fractions_batch_is_valid() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/fractions_batch.toml");
    let batch = load_question_batch(&path).unwrap();
    assert_eq!(batch.topic, "Fractions");
    assert_eq!(batch.sheet_number, "7");
    assert_eq!(batch.questions.len(), 50);
    assert!(batch.questions.iter().all(QuestionRecord::answer_in_options));
}

#[test]
fn runner_migrates_configured_bank() {
    logging::init(false);
    let dir = tempfile::tempdir().unwrap();
    let bank = write_bank(dir.path(), TEN_COLUMN_BANK);
    let config = Config {
        question_bank_path: bank.display().to_string(),
        questions_file: Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("demos/fractions_batch.toml")
            .display()
            .to_string(),
        ..Config::default()
    };

    let result = MigrationRunner::initialize(config).unwrap().run().unwrap();
    assert_eq!(result.appended_rows, 50);
    assert_eq!(result.existing_rows, 1);

    let table = BankStore::load(&bank).unwrap();
    assert_eq!(table.rows.len(), 51);
    assert!(table.rows.iter().all(|row| row.len() == 15));
}

#[tokio::test]
#[ignore] // 需要本地运行中的应用和 Chromium：cargo test -- --ignored
async fn hiding_first_tile_removes_it_from_landing() {
    logging::init(true);

    let config = Config::from_env();
    let outcome = VerificationRunner::initialize(config)
        .await
        .expect("启动浏览器失败")
        .run()
        .await
        .expect("验证流程失败");

    println!("{}", outcome);
    assert!(outcome.is_success(), "{}", outcome);
}
