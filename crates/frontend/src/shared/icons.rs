use leptos::prelude::*;

/// SVG path data for the glyphs the portal uses
fn glyph(name: &str) -> &'static str {
    match name {
        "home" => "M3 9l9-7 9 7v11a2 2 0 0 1-2 2H5a2 2 0 0 1-2-2z M9 22V12h6v10",
        "category" => "M3 3h7v7H3z M14 3h7v7h-7z M14 14h7v7h-7z M3 14h7v7H3z",
        "inventory" => "M21 16V8l-9-5-9 5v8l9 5 9-5z M3.27 6.96 12 12l8.73-5.04 M12 22V12",
        "perm_media" => "M3 5h18v14H3z M3 15l5-5 4 4 3-3 6 6",
        "extension" => "M20 12h-2a2 2 0 1 0-4 0h-2V8a2 2 0 1 0 0-4V2H4v8a2 2 0 1 1 0 4v8h8v-2a2 2 0 1 1 4 0v2h4z",
        "video_library" => "M2 6h14v12H2z M16 10l6-4v12l-6-4",
        "menu_book" => "M2 4h7a3 3 0 0 1 3 3v13a2 2 0 0 0-2-2H2z M22 4h-7a3 3 0 0 0-3 3v13a2 2 0 0 1 2-2h8z",
        "support_agent" => "M3 18v-6a9 9 0 0 1 18 0v6 M21 19a2 2 0 0 1-2 2h-1v-7h3z M3 19a2 2 0 0 0 2 2h1v-7H3z",
        "school" => "M22 10L12 5 2 10l10 5 10-5z M6 12v5c3 2 9 2 12 0v-5",
        "admin_panel_settings" => "M12 2l8 4v6c0 5-3.5 9-8 10-4.5-1-8-5-8-10V6z M9 12l2 2 4-4",
        "chevron-right" => "M9 18l6-6-6-6",
        "log-out" => "M9 21H5a2 2 0 0 1-2-2V5a2 2 0 0 1 2-2h4 M16 17l5-5-5-5 M21 12H9",
        "panel-left" => "M3 3h18v18H3z M9 3v18",
        _ => "M3 12h18 M3 6h18 M3 18h18",
    }
}

pub fn icon(name: &str) -> AnyView {
    let d = glyph(name);
    view! {
        <svg width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" aria-hidden="true">
            <path d=d/>
        </svg>
    }
    .into_any()
}
