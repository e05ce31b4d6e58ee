use anyhow::Result;
use chrono::NaiveDate;
use httpmock::prelude::*;
use rewards_etl::domain::model::SortOrder;
use rewards_etl::{CliConfig, EtlEngine, LocalStorage, RewardsPipeline};
use std::io::Read;
use tempfile::TempDir;

fn feed() -> serde_json::Value {
    serde_json::json!({
        "transactions": [
            {"transactionId": "t1", "customerId": "c1", "customerName": "Amit",
             "date": "2023-01-15", "product": "Coffee Maker", "amount": 120.0},
            {"transactionId": "t2", "customerId": "c2", "customerName": "Beatriz",
             "date": "2023-02-10", "product": "Headphones", "amount": 75.5},
            {"transactionId": "t3", "customerId": "c1", "customerName": "Amit",
             "date": "2023-02-28", "product": "Espresso Beans", "amount": 45.0},
            {"transactionId": "t4", "customerId": "c3", "customerName": "Chen",
             "date": "2023-03-05", "product": "Monitor", "amount": 210.0},
            {"transactionId": "t5", "customerId": "c1", "customerName": "Amit",
             "date": "2023-03-09", "product": "Desk Lamp", "amount": 52.25},
            {"transactionId": "t6", "customerId": "c3", "customerName": "Chen",
             "date": "2023-04-20", "product": "Keyboard", "amount": 100.0}
        ]
    })
}

fn base_config(api_endpoint: String, output_path: String) -> CliConfig {
    CliConfig {
        api_endpoint,
        output_path,
        search: None,
        sort_key: None,
        sort_order: SortOrder::Asc,
        from_date: None,
        to_date: None,
        all_dates: true,
        page: None,
        rows_per_page: Some(10),
        view_config: None,
        verbose: false,
        view_file: None,
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 5, 1).unwrap()
}

async fn run_engine(config: CliConfig) -> rewards_etl::Result<String> {
    let storage = LocalStorage::new(config.output_path.clone());
    let pipeline = RewardsPipeline::new(storage, config, today());
    EtlEngine::new(pipeline).run().await
}

fn read_report(output_path: &str) -> Result<Vec<(String, String)>> {
    let zip_path = std::path::Path::new(output_path).join("rewards_report.zip");
    let data = std::fs::read(zip_path)?;
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(data))?;
    let mut files = Vec::new();
    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        let mut content = String::new();
        file.read_to_string(&mut content)?;
        files.push((file.name().to_string(), content));
    }
    files.sort();
    Ok(files)
}

fn file_content<'a>(files: &'a [(String, String)], name: &str) -> &'a str {
    files
        .iter()
        .find(|(file_name, _)| file_name == name)
        .map(|(_, content)| content.as_str())
        .unwrap_or_default()
}

#[tokio::test]
async fn test_end_to_end_report() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/db.json");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(feed());
    });

    let result = run_engine(base_config(server.url("/db.json"), output_path.clone())).await?;
    api_mock.assert();
    assert!(result.ends_with("rewards_report.zip"));

    let files = read_report(&output_path)?;
    let names: Vec<&str> = files.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(
        names,
        vec!["monthly_rewards.csv", "total_rewards.csv", "transactions.csv"]
    );

    let transactions = file_content(&files, "transactions.csv");
    let lines: Vec<&str> = transactions.lines().collect();
    assert_eq!(
        lines[0],
        "Transaction ID,Customer Name,Purchase Date,Product Purchased,Price ($),Reward Points"
    );
    assert_eq!(lines.len(), 7);
    assert_eq!(lines[1], "t1,Amit,15-1-2023,Coffee Maker,120,90");
    assert_eq!(lines[2], "t2,Beatriz,10-2-2023,Headphones,75.5,25");

    let monthly = file_content(&files, "monthly_rewards.csv");
    assert!(monthly.contains("c1,Amit,Jan 2023,90"));
    assert!(monthly.contains("c1,Amit,Feb 2023,0"));
    assert!(monthly.contains("c3,Chen,Apr 2023,50"));

    let totals = file_content(&files, "total_rewards.csv");
    assert!(totals.contains("c1,Amit,92"));
    assert!(totals.contains("c2,Beatriz,25"));
    assert!(totals.contains("c3,Chen,320"));

    Ok(())
}

#[tokio::test]
async fn test_search_and_sort_shape_the_page() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/db.json");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(feed());
    });

    let mut config = base_config(server.url("/db.json"), output_path.clone());
    config.search = Some("amit".to_string());
    config.sort_key = Some("amount".to_string());
    config.sort_order = SortOrder::Desc;
    run_engine(config).await?;

    let files = read_report(&output_path)?;
    let transactions = file_content(&files, "transactions.csv");
    let lines: Vec<&str> = transactions.lines().collect();
    // Amit's three purchases, most expensive first.
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[1], "t1,Amit,15-1-2023,Coffee Maker,120,90");
    assert_eq!(lines[2], "t5,Amit,9-3-2023,Desk Lamp,52.25,2");
    assert_eq!(lines[3], "t3,Amit,28-2-2023,Espresso Beans,45,0");

    Ok(())
}

#[tokio::test]
async fn test_date_window_filters_the_report() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/db.json");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(feed());
    });

    let mut config = base_config(server.url("/db.json"), output_path.clone());
    config.all_dates = false;
    config.from_date = Some("2023-02-01".to_string());
    config.to_date = Some("2023-03-31".to_string());
    run_engine(config).await?;

    let files = read_report(&output_path)?;
    let transactions = file_content(&files, "transactions.csv");
    // t2, t3, t4, t5 fall inside the inclusive window.
    assert_eq!(transactions.lines().count(), 5);
    assert!(!transactions.contains("Coffee Maker"));
    assert!(!transactions.contains("Keyboard"));

    // Monthly rows filter on their earliest contributing date.
    let monthly = file_content(&files, "monthly_rewards.csv");
    assert!(monthly.contains("Feb 2023"));
    assert!(!monthly.contains("Jan 2023"));

    Ok(())
}

#[tokio::test]
async fn test_fetch_failure_propagates() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/db.json");
        then.status(500);
    });

    let result = run_engine(base_config(server.url("/db.json"), output_path.clone())).await;
    api_mock.assert();
    assert!(result.is_err());

    // No partial report on failure.
    let zip_path = std::path::Path::new(&output_path).join("rewards_report.zip");
    assert!(!zip_path.exists());

    Ok(())
}

#[tokio::test]
async fn test_malformed_feed_is_an_error() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/db.json");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"data": "not transactions"}));
    });

    let result = run_engine(base_config(server.url("/db.json"), output_path)).await;
    assert!(result.is_err());

    Ok(())
}
