//! End-to-end tests for the validation step
//!
//! Each test builds a data directory in a temp folder, runs the step and
//! inspects the report written back into that folder.

use rcp_common::config::{AnalyticsConfig, DataDirSource, LoggingConfig, PipelineConfig};
use rcp_common::{DataFormat, Error, Table};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn config_for(dir: &Path, format: DataFormat) -> PipelineConfig {
    PipelineConfig {
        data_dir: dir.to_path_buf(),
        data_dir_source: DataDirSource::CommandLine,
        format,
        logging: LoggingConfig::default(),
        analytics: AnalyticsConfig::default(),
        config_file: None,
    }
}

fn write_clean_csv(dir: &Path) {
    fs::write(
        dir.join("recipe.csv"),
        "recipe_id,name,description,servings,prep_time_min,cook_time_min,total_time_min,difficulty\n\
         recipe_chicken_curry,Chicken Curry,Chicken curry for 2 people.,2,15,25,40,medium\n\
         recipe_poha,Poha,Synthetic recipe: Poha,3,10,12,,easy\n",
    )
    .unwrap();
    fs::write(
        dir.join("ingredients.csv"),
        "recipe_id,ingredient_id,name,quantity,unit,notes,order\n\
         recipe_chicken_curry,ing1,boneless chicken,300,g,cut into bite-sized pieces,1\n\
         recipe_chicken_curry,ing2,cooking oil,1,tbsp,,2\n",
    )
    .unwrap();
    fs::write(
        dir.join("steps.csv"),
        "recipe_id,step_id,order,text\n\
         recipe_chicken_curry,step1,1,Wash the chicken and cut into pieces.\n",
    )
    .unwrap();
    fs::write(
        dir.join("interactions.csv"),
        "interaction_id,user_id,recipe_id,type,rating,difficulty_used,source,created_at\n\
         int_0,user1,recipe_poha,view,,easy,web,\n\
         int_1,user_sanket,recipe_chicken_curry,rating,5,medium,mobile,\n",
    )
    .unwrap();
}

#[tokio::test]
async fn test_clean_data_writes_header_only_report() {
    let dir = TempDir::new().unwrap();
    write_clean_csv(dir.path());

    let outcome = rcp_vd::run(&config_for(dir.path(), DataFormat::Csv))
        .await
        .unwrap();

    assert!(outcome.findings.is_empty());
    assert_eq!(outcome.report_path, dir.path().join("validation_report.csv"));
    let report = fs::read_to_string(&outcome.report_path).unwrap();
    assert_eq!(report.trim_end(), "table,row_index,error");
}

#[tokio::test]
async fn test_findings_reported_in_table_order() {
    let dir = TempDir::new().unwrap();
    write_clean_csv(dir.path());
    fs::write(
        dir.path().join("interactions.csv"),
        "interaction_id,user_id,recipe_id,type,rating,difficulty_used,source\n\
         int_0,user1,recipe_poha,rating,7,easy,web\n\
         int_1,,recipe_poha,share,,easy,web\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("recipe.csv"),
        "recipe_id,name,servings,prep_time_min,cook_time_min,difficulty\n\
         r1,Soup,0,5,5,EXTREME\n",
    )
    .unwrap();

    let outcome = rcp_vd::run(&config_for(dir.path(), DataFormat::Csv))
        .await
        .unwrap();

    let summary: Vec<(Table, usize, &str)> = outcome
        .findings
        .iter()
        .map(|f| (f.table, f.row_index, f.message.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (Table::Recipe, 0, "servings must be > 0"),
            (Table::Recipe, 0, "invalid difficulty: EXTREME"),
            (Table::Interactions, 0, "invalid rating: 7"),
            (Table::Interactions, 1, "user_id is null/empty"),
            (Table::Interactions, 1, "invalid type: share"),
        ]
    );

    let report = fs::read_to_string(&outcome.report_path).unwrap();
    assert!(report.contains("recipe,0,servings must be > 0"));
    assert!(report.contains("interactions,0,invalid rating: 7"));
}

#[tokio::test]
async fn test_json_format_end_to_end() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("recipe.json"),
        r#"[{"recipe_id": "r1", "name": "Soup", "servings": 2, "prep_time_min": 5, "cook_time_min": 5, "difficulty": "easy"}]"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("ingredients.json"),
        r#"[{"recipe_id": "r1", "name": "water", "quantity": -1}]"#,
    )
    .unwrap();
    fs::write(dir.path().join("steps.json"), "[]").unwrap();
    fs::write(
        dir.path().join("interactions.json"),
        r#"[{"interaction_id": "int_0", "user_id": "user1", "recipe_id": "r1", "type": "rating", "rating": null}]"#,
    )
    .unwrap();

    let outcome = rcp_vd::run(&config_for(dir.path(), DataFormat::Json))
        .await
        .unwrap();

    assert_eq!(outcome.findings.len(), 1);
    assert_eq!(outcome.report_path, dir.path().join("validation_report.json"));

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&outcome.report_path).unwrap()).unwrap();
    assert_eq!(report[0]["table"], "ingredients");
    assert_eq!(report[0]["index"], 0);
    assert_eq!(report[0]["error"], "quantity must be >= 0 or empty, got: -1");
}

#[tokio::test]
async fn test_missing_input_aborts_without_report() {
    let dir = TempDir::new().unwrap();
    write_clean_csv(dir.path());
    fs::remove_file(dir.path().join("interactions.csv")).unwrap();

    let err = rcp_vd::run(&config_for(dir.path(), DataFormat::Csv))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::InputUnavailable { .. }));
    assert!(!dir.path().join("validation_report.csv").exists());
}
