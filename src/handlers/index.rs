// src/handlers/index.rs
use actix_web::http::header;
use actix_web::HttpResponse;

const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";
const HTML_CACHE_CONTROL: &str = "public, max-age=120, stale-while-revalidate=60";

const LANDING_HTML: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width,initial-scale=1">
  <title>Nerevar — Morrowind Multiplayer Manager</title>
  <style>
    :root { color-scheme: dark; }
    body { margin: 0; min-height: 100vh; background: #14100d; color: #e8ddc9; font: 16px/1.6 -apple-system, BlinkMacSystemFont, "Segoe UI", Helvetica, Arial, sans-serif; }
    header { text-align: center; padding: 96px 20px 56px; background: linear-gradient(180deg, #1d1812, #14100d); }
    h1 { margin: 0 0 8px; font-size: 56px; letter-spacing: 1px; color: #d9a741; }
    header p { margin: 0; color: #a89878; font-size: 20px; }
    .cta { margin-top: 32px; }
    .cta a { display: inline-block; margin: 0 8px; padding: 12px 22px; border-radius: 8px; border: 1px solid #5a4a2e; color: #e8ddc9; text-decoration: none; }
    .cta a.primary { background: #d9a741; border-color: #d9a741; color: #14100d; }
    main { max-width: 960px; margin: 0 auto; padding: 48px 20px; display: grid; gap: 20px; grid-template-columns: repeat(auto-fit, minmax(260px, 1fr)); }
    section { border: 1px solid #2c241a; border-radius: 12px; background: #1a1510; padding: 20px 22px; }
    h2 { margin: 0 0 8px; font-size: 18px; color: #d9a741; }
    section p { margin: 0; color: #a89878; }
    footer { text-align: center; padding: 32px 20px 48px; color: #6f6350; }
  </style>
</head>
<body>
  <header>
    <h1>Nerevar</h1>
    <p>The Elder Scrolls III: Morrowind Multiplayer Manager</p>
    <div class="cta">
      <a class="primary" href="/api/v1/releases/nerevar">Download Launcher</a>
      <a href="/api/v1/servers/list">Browse Servers</a>
    </div>
  </header>
  <main>
    <section>
      <h2>OpenMW Integration</h2>
      <p>Seamless integration with OpenMW for easy setup of your gameplay experience.</p>
    </section>
    <section>
      <h2>Server Management</h2>
      <p>Host and manage your own TES3MP servers without touching a config file.</p>
    </section>
    <section>
      <h2>Server Browser</h2>
      <p>Live directory of public servers, straight from the TES3MP master server.</p>
    </section>
  </main>
  <footer>Nerevar is a community project and is not affiliated with Bethesda Softworks.</footer>
</body>
</html>
"#;

pub async fn landing() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(HTML_CONTENT_TYPE)
        .insert_header((header::CACHE_CONTROL, HTML_CACHE_CONTROL))
        .body(LANDING_HTML)
}
