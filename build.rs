use std::env;
use std::fs;
use std::path::Path;

fn main() {
    println!("cargo:rerun-if-changed=frontend/dist");

    // 获取项目根目录
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set");
    let dist_path = Path::new(&manifest_dir).join("frontend/dist");

    if !dist_path.join("index.html").exists() {
        println!("cargo:warning=frontend/dist/index.html not found, embedding placeholder pages");
        create_fallback_files(&dist_path);
    }
}

fn create_fallback_files(dist_path: &Path) {
    fs::create_dir_all(dist_path).expect("Failed to create dist directory");

    let fallback_html = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Portfolio - pages missing</title>
</head>
<body>
    <h1>Portfolio</h1>
    <p>The site pages were not found at build time.</p>
    <p>Put <code>index.html</code>, <code>style.css</code> and <code>script.js</code> under <code>frontend/dist/</code> and rebuild.</p>
</body>
</html>"#;

    fs::write(dist_path.join("index.html"), fallback_html)
        .expect("Failed to write fallback index.html");

    if !dist_path.join("submissions.html").exists() {
        fs::write(
            dist_path.join("submissions.html"),
            "<!DOCTYPE html><html lang=\"en\"><body><h1>Submissions</h1></body></html>",
        )
        .expect("Failed to write fallback submissions.html");
    }
}
