use cardcraft::core::config::{AppConfig, ProvidersConfig, RomExchangeProviderConfig};
use cardcraft::store::DailyCache;
use cardcraft::{AppCommand, RunOptions};
use chrono::NaiveDate;
use std::fs;
use tempfile::TempDir;
use tracing::info;

mod test_utils {
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Serves each body as one listing page, followed by an empty page.
    /// Every page is expected to be requested `times` times.
    pub async fn create_listing_server(pages: &[&str], times: u64) -> MockServer {
        let mock_server = MockServer::start().await;
        for (index, body) in pages.iter().chain(std::iter::once(&"[]")).enumerate() {
            let mock = Mock::given(method("GET"))
                .and(path("/api"))
                .and(query_param("item", "card"))
                .and(query_param("page", index.to_string()))
                .respond_with(ResponseTemplate::new(200).set_body_string(*body));
            mock.expect(times).mount(&mock_server).await;
        }
        mock_server
    }

    pub async fn create_failing_server(status: u16) -> MockServer {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api"))
            .respond_with(ResponseTemplate::new(status).set_body_string("backend down"))
            .expect(1)
            .mount(&mock_server)
            .await;
        mock_server
    }
}

const PAGE_0: &str = r#"[
    {"name": "A Card", "global": {"latest": "100"}},
    {"name": "B Card", "global": {"latest": 50}},
    {"name": "Bundle [3] Card", "global": {"latest": 10}}
]"#;
const PAGE_1: &str = r#"[
    {"name": "X Card", "global": {"latest": 200}},
    {"name": "Unlisted Card", "global": {"latest": 0}}
]"#;

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
}

fn write_config(dir: &TempDir, base_url: &str) -> AppConfig {
    let config = AppConfig {
        cache_dir: dir.path().join("cache"),
        dust_table: dir.path().join("cardust.csv"),
        recipe_table: dir.path().join("cardcraft.csv"),
        providers: ProvidersConfig {
            rom_exchange: RomExchangeProviderConfig {
                base_url: base_url.to_string(),
            },
        },
        ..AppConfig::default()
    };
    fs::write(&config.dust_table, "/name,dust\nA,10\nB,\n").expect("Failed to write dust table");
    fs::write(
        &config.recipe_table,
        "/output,inputs\nX,A,B,@2,$5\nMissing,A,Ghost\n",
    )
    .expect("Failed to write recipe table");
    config
}

#[test_log::test(tokio::test)]
async fn test_full_app_flow_with_mock() {
    let mock_server = test_utils::create_listing_server(&[PAGE_0, PAGE_1], 1).await;
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = write_config(&dir, &mock_server.uri());

    let result =
        cardcraft::run_with_config(AppCommand::Report, &config, &RunOptions::default(), day())
            .await;
    assert!(result.is_ok(), "Run failed with: {:?}", result.err());

    let cache = DailyCache::new(&config.cache_dir);
    assert!(cache.has_cache(day()));
    assert_eq!(cache.read_all_pages(day()).unwrap().len(), 2);
}

#[test_log::test(tokio::test)]
async fn test_second_run_same_day_uses_cache() {
    // Each page may only be requested once across both runs
    let mock_server = test_utils::create_listing_server(&[PAGE_0, PAGE_1], 1).await;
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = write_config(&dir, &mock_server.uri());

    for command in [AppCommand::Report, AppCommand::Recipes] {
        let result =
            cardcraft::run_with_config(command, &config, &RunOptions::default(), day()).await;
        assert!(result.is_ok(), "Run failed with: {:?}", result.err());
    }

    let analysis = cardcraft::core::pipeline::analyze(
        &config,
        &DailyCache::new(&config.cache_dir)
            .read_all_pages(day())
            .unwrap(),
    )
    .unwrap();
    info!(recipes = analysis.recipes.len(), "Analyzed cached pages");

    assert_eq!(analysis.catalog.len(), 3);
    assert!(!analysis.catalog.contains("Bundle [3]"));
    assert_eq!(analysis.unit_dust_price, Some(10.0));

    let x = analysis.recipes.iter().find(|r| r.output == "X").unwrap();
    assert_eq!(x.cost, Some(175.0));
    assert_eq!(x.profit, Some(3.0));
    let missing = analysis
        .recipes
        .iter()
        .find(|r| r.output == "Missing")
        .unwrap();
    assert!(missing.profit.is_none());
}

#[test_log::test(tokio::test)]
async fn test_refresh_fetches_again() {
    let mock_server = test_utils::create_listing_server(&[PAGE_0], 2).await;
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = write_config(&dir, &mock_server.uri());

    let refresh = RunOptions {
        refresh: true,
        top_n: Some(3),
    };
    cardcraft::run_with_config(AppCommand::Items, &config, &RunOptions::default(), day())
        .await
        .unwrap();
    cardcraft::run_with_config(AppCommand::Items, &config, &refresh, day())
        .await
        .unwrap();
}

#[test_log::test(tokio::test)]
async fn test_remote_error_aborts_run() {
    let mock_server = test_utils::create_failing_server(500).await;
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = write_config(&dir, &mock_server.uri());

    let result =
        cardcraft::run_with_config(AppCommand::Report, &config, &RunOptions::default(), day())
            .await;
    let err = result.expect_err("Run should fail on a server error");
    assert_eq!(
        err.to_string(),
        "HTTP error: 500 Internal Server Error for page 0: backend down"
    );
    assert!(!DailyCache::new(&config.cache_dir).has_cache(day()));
}

#[test_log::test(tokio::test)]
async fn test_run_command_with_config_file() {
    let mock_server = test_utils::create_listing_server(&[PAGE_0, PAGE_1], 1).await;
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = write_config(&dir, &mock_server.uri());

    let config_path = dir.path().join("config.yaml");
    let config_content = format!(
        r#"
        cache_dir: "{}"
        dust_table: "{}"
        recipe_table: "{}"
        top_n: 2
        providers:
          rom_exchange:
            base_url: "{}"
    "#,
        config.cache_dir.display(),
        config.dust_table.display(),
        config.recipe_table.display(),
        mock_server.uri()
    );
    fs::write(&config_path, &config_content).expect("Failed to write config file");

    let result = cardcraft::run_command(
        AppCommand::Report,
        Some(config_path.to_str().unwrap()),
        RunOptions::default(),
    )
    .await;
    assert!(result.is_ok(), "Run failed with: {:?}", result.err());
}
