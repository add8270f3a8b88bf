use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use tempfile::tempdir;

use dae_cleaner::acquirer::HttpFetch;
use dae_cleaner::config::Config;
use dae_cleaner::pipeline::Pipeline;
use dae_cleaner::sink;

struct StubFetch {
    body: String,
}

#[async_trait]
impl HttpFetch for StubFetch {
    async fn get_text(&self, _url: &str) -> dae_cleaner::error::Result<String> {
        Ok(self.body.clone())
    }
}

const SAMPLE: &str = "\
nom,adr_num,adr_voie,com_cp,com_nom,tel1,freq_mnt,dermnt,lat_coor1,long_coor1,observ
Mairie,12 - 14,Rue  Foch 34000 Montpellier,34000,MONTPELLIER,0412345678,tout les ans,2023-05-17,43.6112,3.8767,x
Gymnase,-,-,0,castelnau-le-lez,-,2023-01-01,not-a-date,abc,,y
";

fn test_config(temp: &std::path::Path) -> Config {
    let mut config = Config::default();
    config.source.url = "https://example.org/registry/MMM_MMM_DAE.csv?dl=1".to_string();
    config.source.data_dir = temp.join("data");
    config.source.output = temp.join("data/cleaned.csv");
    config
}

#[tokio::test]
async fn pipeline_cleans_the_sample_table() -> Result<()> {
    let temp = tempdir()?;
    let config = test_config(temp.path());

    let http = StubFetch {
        body: SAMPLE.to_string(),
    };
    let report = Pipeline::run(&config, &http).await?;
    assert_eq!(report.total_records, 2);

    let rows = sink::read_table(&report.output_path)?;
    assert_eq!(rows.len(), 2);

    let first = &rows[0];
    assert_eq!(first.name.as_deref(), Some("Mairie"));
    assert_eq!(
        first.address.as_deref(),
        Some("12-14 Rue Foch 34000 Montpellier")
    );
    assert_eq!(first.phone.as_deref(), Some("+33 4 12 34 56 78"));
    assert_eq!(first.maintenance_frequency.as_deref(), Some("Tous les ans"));
    assert_eq!(first.last_maintenance, NaiveDate::from_ymd_opt(2023, 5, 17));
    assert_eq!(first.latitude, Some(43.6112));
    assert_eq!(first.longitude, Some(3.8767));

    let second = &rows[1];
    assert_eq!(second.name.as_deref(), Some("Gymnase"));
    // every address component was a placeholder except the city
    assert_eq!(second.address.as_deref(), Some("Castelnau-le-lez"));
    assert_eq!(second.phone, None);
    // a date in the frequency column is garbage, not a frequency
    assert_eq!(second.maintenance_frequency, None);
    assert_eq!(second.last_maintenance, None);
    assert_eq!(second.latitude, None);
    assert_eq!(second.longitude, None);

    Ok(())
}

#[tokio::test]
async fn second_run_reuses_the_cached_download() -> Result<()> {
    let temp = tempdir()?;
    let config = test_config(temp.path());

    Pipeline::run(
        &config,
        &StubFetch {
            body: SAMPLE.to_string(),
        },
    )
    .await?;

    // An empty body would fail the column check, so a successful second run
    // proves the stub was never consulted again
    let report = Pipeline::run(&config, &StubFetch { body: String::new() }).await?;
    assert_eq!(report.total_records, 2);
    Ok(())
}

#[tokio::test]
async fn written_table_round_trips() -> Result<()> {
    let temp = tempdir()?;
    let config = test_config(temp.path());

    let report = Pipeline::run(
        &config,
        &StubFetch {
            body: SAMPLE.to_string(),
        },
    )
    .await?;

    let rows = sink::read_table(&report.output_path)?;
    let rewritten = temp.path().join("rewritten.csv");
    sink::write_table(&rewritten, &rows)?;
    assert_eq!(sink::read_table(&rewritten)?, rows);
    Ok(())
}

#[tokio::test]
async fn missing_required_column_aborts_the_run() -> Result<()> {
    let temp = tempdir()?;
    let config = test_config(temp.path());

    let result = Pipeline::run(
        &config,
        &StubFetch {
            body: "nom,adr_num\nMairie,12\n".to_string(),
        },
    )
    .await;

    assert!(result.is_err());
    // a fatal structural error must not leave a partial output file behind
    assert!(!config.source.output.exists());
    Ok(())
}
