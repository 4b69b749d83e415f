/*!
 * End-to-end mirror workflow tests running the controller over a temp site
 * with mock providers
 */

use std::collections::HashMap;
use std::sync::Arc;

use uzmirror::app_config::Config;
use uzmirror::app_controller::Controller;
use uzmirror::providers::mock::MockProvider;

use crate::common::{create_temp_dir, create_test_file, create_test_site, run_options_for};

fn canned_provider() -> Arc<MockProvider> {
    Arc::new(MockProvider::with_responses(HashMap::from([
        ("Привет".to_string(), "Salom".to_string()),
        ("Мир".to_string(), "Dunyo".to_string()),
        ("Заголовок".to_string(), "Sarlavha".to_string()),
        ("Описание страницы".to_string(), "Sahifa tavsifi".to_string()),
        ("Документация".to_string(), "Hujjatlar".to_string()),
    ])))
}

#[tokio::test]
async fn test_run_withSampleSite_shouldProduceTranslatedMirror() {
    let temp_dir = create_temp_dir().unwrap();
    let root = temp_dir.path().to_path_buf();
    create_test_site(&root).unwrap();

    let mut options = run_options_for(&root);
    options.modify_source = true;

    let mut controller = Controller::with_config(Config::default(), canned_provider()).unwrap();
    let summary = controller.run(&options).await.unwrap();

    assert_eq!(summary.html_files, 2);
    assert_eq!(summary.copied_files, 1);

    // Translated root page
    let mirrored = std::fs::read_to_string(root.join("uz/index.html")).unwrap();
    assert!(mirrored.contains("Salom"));
    assert!(mirrored.contains("Dunyo"));
    assert!(mirrored.contains(r#"title="Sarlavha""#));
    assert!(mirrored.contains(r#"content="Sahifa tavsifi""#));
    assert!(mirrored.contains(r#"lang="uz""#));
    assert!(mirrored.contains(r#"hreflang="ru""#));
    assert!(mirrored.contains(r#"href="../index.html""#));
    assert!(mirrored.contains("data-lang-switch"));
    // Script content survives byte-identical
    assert!(mirrored.contains(r#"var greeting = "Привет";"#));

    // Translated nested page links up through two levels
    let nested = std::fs::read_to_string(root.join("uz/docs/page.html")).unwrap();
    assert!(nested.contains("Hujjatlar"));
    assert!(nested.contains(r#"href="../../docs/page.html""#));

    // Source page was rewritten in place with the opposite direction
    let source = std::fs::read_to_string(root.join("index.html")).unwrap();
    assert!(source.contains("data-lang-switch"));
    assert!(source.contains(r#"hreflang="uz""#));
    assert!(source.contains(r#"href="uz/index.html""#));
    assert!(source.contains("O'zbekcha"));

    // Non-HTML assets are mirrored verbatim
    assert_eq!(
        std::fs::read(root.join("css/style.css")).unwrap(),
        std::fs::read(root.join("uz/css/style.css")).unwrap()
    );

    // Report and cache land on disk
    let report = std::fs::read_to_string(root.join("uz/translation_report.csv")).unwrap();
    assert!(report.lines().count() >= 3);
    assert!(report.contains("index.html"));
    assert!(report.contains("docs/page.html"));
    assert!(options.cache_path.is_file());
}

#[tokio::test]
async fn test_run_twice_shouldBeIdempotentAndUseCache() {
    let temp_dir = create_temp_dir().unwrap();
    let root = temp_dir.path().to_path_buf();
    create_test_site(&root).unwrap();

    let mut options = run_options_for(&root);
    options.modify_source = true;

    let mut controller = Controller::with_config(Config::default(), canned_provider()).unwrap();
    controller.run(&options).await.unwrap();

    let first_mirror = std::fs::read_to_string(root.join("uz/index.html")).unwrap();
    let first_source = std::fs::read_to_string(root.join("index.html")).unwrap();

    // Second run with a warm cache and a fresh provider
    let second_provider = Arc::new(MockProvider::echo());
    let mut second_controller =
        Controller::with_config(Config::default(), second_provider.clone()).unwrap();
    let summary = second_controller.run(&options).await.unwrap();

    // The walk never descends into its own output
    assert_eq!(summary.html_files, 2);

    // Zero API calls: every unit was cached
    assert_eq!(second_provider.call_count(), 0);

    // Byte-identical output, no duplicated switchers or hreflang links
    let second_mirror = std::fs::read_to_string(root.join("uz/index.html")).unwrap();
    let second_source = std::fs::read_to_string(root.join("index.html")).unwrap();
    assert_eq!(first_mirror, second_mirror);
    assert_eq!(first_source, second_source);
    assert_eq!(second_mirror.matches("data-lang-switch").count(), 1);
    assert_eq!(second_source.matches("data-lang-switch").count(), 1);
}

#[tokio::test]
async fn test_run_withGlossary_shouldEnforceTargetTerms() {
    let temp_dir = create_temp_dir().unwrap();
    let root = temp_dir.path().to_path_buf();
    create_test_file(
        &root,
        "index.html",
        "<html lang=\"ru\"><body><p>Плиты Даногипс</p></body></html>",
    )
    .unwrap();
    create_test_file(
        &root,
        "translate_glossary.csv",
        "source,target,mode\nДаногипс,Danogips,dt\n",
    )
    .unwrap();

    let provider = Arc::new(MockProvider::with_responses(HashMap::from([(
        "Плиты Danogips".to_string(),
        "Danogips plitalari".to_string(),
    )])));
    let mut controller = Controller::with_config(Config::default(), provider.clone()).unwrap();
    controller.run(&run_options_for(&root)).await.unwrap();

    // The glossary ran before the provider saw the text
    assert_eq!(provider.received_texts(), vec!["Плиты Danogips".to_string()]);

    let mirrored = std::fs::read_to_string(root.join("uz/index.html")).unwrap();
    assert!(mirrored.contains("Danogips plitalari"));
    assert!(!mirrored.contains("Даногипс"));
}

#[tokio::test]
async fn test_run_withFailingProvider_shouldAbortWithoutReportOrCache() {
    let temp_dir = create_temp_dir().unwrap();
    let root = temp_dir.path().to_path_buf();
    create_test_site(&root).unwrap();

    let mut config = Config::default();
    config.translation.max_attempts = 1;

    let options = run_options_for(&root);
    let mut controller =
        Controller::with_config(config, Arc::new(MockProvider::failing())).unwrap();

    let result = controller.run(&options).await;

    assert!(result.is_err());
    // Fatal translation failure skips the end-of-run persistence
    assert!(!options.report_path.exists());
    assert!(!options.cache_path.exists());
}

#[tokio::test]
async fn test_run_withCleanFlag_shouldRemoveStaleOutput() {
    let temp_dir = create_temp_dir().unwrap();
    let root = temp_dir.path().to_path_buf();
    create_test_site(&root).unwrap();
    create_test_file(&root, "uz/stale.html", "<html></html>").unwrap();

    let mut options = run_options_for(&root);
    options.clean = true;

    let mut controller = Controller::with_config(Config::default(), canned_provider()).unwrap();
    controller.run(&options).await.unwrap();

    assert!(!root.join("uz/stale.html").exists());
    assert!(root.join("uz/index.html").is_file());
}

#[tokio::test]
async fn test_run_withMissingSourceRoot_shouldFail() {
    let temp_dir = create_temp_dir().unwrap();
    let root = temp_dir.path().join("missing");

    let mut controller =
        Controller::with_config(Config::default(), Arc::new(MockProvider::echo())).unwrap();
    let result = controller.run(&run_options_for(&root)).await;

    assert!(result.is_err());
}
