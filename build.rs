use std::env;
use std::fs;
use std::path::Path;

fn main() {
    println!("cargo:rerun-if-changed=frontend/dist");

    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let dist_path = Path::new(&manifest_dir).join("frontend/dist");

    if !dist_path.join("index.html").exists() {
        eprintln!("Warning: frontend/dist not found, generating minimal portal pages");
        create_fallback_pages(&dist_path);
    }
}

fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="de">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
        body {{ font-family: -apple-system, 'Segoe UI', Roboto, sans-serif; max-width: 860px; margin: 40px auto; padding: 0 20px; }}
        table {{ border-collapse: collapse; width: 100%; }}
        th, td {{ border-bottom: 1px solid #ddd; padding: 6px; text-align: left; }}
    </style>
</head>
<body>
    <h1>{title}</h1>
{body}
    <p><a href="/logout">Logout</a></p>
    <script>
        async function api(path, options) {{
            const res = await fetch(path, Object.assign({{ credentials: 'same-origin' }}, options));
            if (res.status === 401) {{ location.href = '/oauth2/authorization/keycloak'; return null; }}
            return res.json();
        }}
    </script>
    <script>{{SCRIPT}}</script>
</body>
</html>"#
    )
}

fn create_fallback_pages(dist_path: &Path) {
    fs::create_dir_all(dist_path.join("lecturer")).expect("Failed to create lecturer directory");
    fs::create_dir_all(dist_path.join("student")).expect("Failed to create student directory");

    let index = page(
        "LVA Submission Portal",
        r#"    <p><a href="/oauth2/authorization/keycloak">Login with Keycloak</a></p>"#,
    )
    .replace("{SCRIPT}", "");

    let student = page(
        "Meine Abgaben",
        r#"    <form id="upload"><input type="file" name="file" required> <button>Hochladen</button></form>
    <table><thead><tr><th>ID</th><th>Datei</th><th>Note</th></tr></thead><tbody id="rows"></tbody></table>"#,
    )
    .replace(
        "{SCRIPT}",
        r#"
        async function load() {
            const body = await api('/submissions/my');
            const rows = document.getElementById('rows');
            rows.innerHTML = '';
            for (const s of (body && body.data ? body.data.items : [])) {
                const tr = document.createElement('tr');
                tr.innerHTML = `<td>${s.id}</td><td><a href="/submissions/file/${s.id}">${s.file_name}</a></td><td>${s.grading || '-'}</td>`;
                rows.appendChild(tr);
            }
        }
        document.getElementById('upload').addEventListener('submit', async (e) => {
            e.preventDefault();
            await api('/submissions/submit', { method: 'POST', body: new FormData(e.target) });
            e.target.reset();
            load();
        });
        load();"#,
    );

    let lecturer = page(
        "Studierende",
        r#"    <table><thead><tr><th>Benutzer</th><th>E-Mail</th><th>Abgaben</th></tr></thead><tbody id="rows"></tbody></table>"#,
    )
    .replace(
        "{SCRIPT}",
        r#"
        async function load() {
            const body = await api('/students');
            const rows = document.getElementById('rows');
            rows.innerHTML = '';
            for (const u of (body && body.data ? body.data.items : [])) {
                const tr = document.createElement('tr');
                const email = u.email || '';
                tr.innerHTML = `<td>${u.username}</td><td>${email}</td><td><a href="/submissions/user/${encodeURIComponent(email)}">anzeigen</a></td>`;
                rows.appendChild(tr);
            }
        }
        load();"#,
    );

    fs::write(dist_path.join("index.html"), index).expect("Failed to write fallback index.html");
    fs::write(dist_path.join("student/list.html"), student)
        .expect("Failed to write fallback student page");
    fs::write(dist_path.join("lecturer/list.html"), lecturer)
        .expect("Failed to write fallback lecturer page");
}
