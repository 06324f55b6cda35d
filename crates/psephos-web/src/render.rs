//! HTML rendering for the listing view.
//!
//! The table is rendered separately so the page can swap it in place when
//! filters change (`ajax=1`).

use psephos_core::{
  WordRecord,
  filter::{FilterParams, ScoreField},
  store::{Pagination, SortDirection, SortField},
};

use crate::{flash::Flash, query::QueryString};

/// Everything the listing templates need.
pub struct ListView<'a> {
  pub rows:       &'a [WordRecord],
  pub total:      u64,
  pub pagination: Pagination,
  pub sort:       SortField,
  pub direction:  SortDirection,
  /// Current query string, minus `ajax`.
  pub query:      &'a QueryString,
  pub filter:     &'a FilterParams,
  pub flash:      Option<Flash>,
}

const SORT_COLUMNS: [SortField; 7] = [
  SortField::Word,
  SortField::N1,
  SortField::N2,
  SortField::N3,
  SortField::N4,
  SortField::N5,
  SortField::N6,
];

const SCORE_FIELDS: [ScoreField; 6] = [
  ScoreField::N1,
  ScoreField::N2,
  ScoreField::N3,
  ScoreField::N4,
  ScoreField::N5,
  ScoreField::N6,
];

pub fn escape(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  for c in s.chars() {
    match c {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#39;"),
      c => out.push(c),
    }
  }
  out
}

// ─── Fragment ────────────────────────────────────────────────────────────────

fn sort_header(view: &ListView<'_>, column: SortField) -> String {
  let (direction, marker) = if column == view.sort {
    let marker = match view.direction {
      SortDirection::Asc => " ▲",
      SortDirection::Desc => " ▼",
    };
    (view.direction.flipped(), marker)
  } else {
    (SortDirection::Asc, "")
  };
  let href = view
    .query
    .with("sort", column.column())
    .with("dir", &direction.to_string())
    .with("page", "1")
    .url("/");
  format!(
    "<th><a class=\"sort\" href=\"{}\">{}{marker}</a></th>",
    escape(&href),
    column.column(),
  )
}

fn row(record: &WordRecord) -> String {
  let mut cells = format!("<td>{}</td>", escape(&record.word));
  for n in record.scores.as_array() {
    cells.push_str(&format!("<td class=\"num\">{n}</td>"));
  }
  format!(
    "<tr data-id=\"{id}\">{cells}<td><button class=\"delete\" data-id=\"{id}\" \
     type=\"button\">Delete</button></td></tr>\n",
    id = record.id,
  )
}

fn pager(view: &ListView<'_>) -> String {
  let page = u64::from(view.pagination.page());
  let pages = view.pagination.page_count(view.total);
  let link = |target: u64, label: &str| {
    let href = view.query.with("page", &target.to_string()).url("/");
    format!("<a class=\"page\" href=\"{}\">{label}</a>", escape(&href))
  };

  let mut out = String::from("<nav class=\"pager\">");
  if page > 1 {
    out.push_str(&link(1, "« first"));
    out.push_str(&link(page - 1, "‹ prev"));
  }
  out.push_str(&format!("<span>page {page} of {pages}</span>"));
  if page < pages {
    out.push_str(&link(page + 1, "next ›"));
    out.push_str(&link(pages, "last »"));
  }
  out.push_str("</nav>");
  out
}

/// The result table with its summary and pager.
pub fn fragment(view: &ListView<'_>) -> String {
  let mut out = format!(
    "<p class=\"summary\">{} words · {} per page</p>\n<table>\n<thead><tr>",
    view.total,
    view.pagination.limit(),
  );
  for column in SORT_COLUMNS {
    out.push_str(&sort_header(view, column));
  }
  out.push_str("<th></th></tr></thead>\n<tbody>\n");
  for record in view.rows {
    out.push_str(&row(record));
  }
  out.push_str("</tbody>\n</table>\n");
  out.push_str(&pager(view));
  out
}

// ─── Full page ───────────────────────────────────────────────────────────────

fn number_input(name: &str, value: Option<&str>, placeholder: &str) -> String {
  format!(
    "<input type=\"number\" min=\"0\" name=\"{name}\" value=\"{}\" \
     placeholder=\"{placeholder}\">",
    escape(value.unwrap_or_default()),
  )
}

fn filter_form(view: &ListView<'_>) -> String {
  let mut out = String::from("<form id=\"filters\" method=\"get\" action=\"/\">\n");
  out.push_str(&format!(
    "<label>contains <input type=\"search\" name=\"q\" value=\"{}\"></label>\n",
    escape(view.filter.q.as_deref().unwrap_or_default()),
  ));
  out.push_str(&format!(
    "<label>per page <input type=\"number\" min=\"1\" max=\"500\" \
     name=\"per_page\" value=\"{}\"></label>\n",
    view.pagination.limit(),
  ));
  out.push_str(&format!(
    "<input type=\"hidden\" name=\"sort\" value=\"{}\">\
     <input type=\"hidden\" name=\"dir\" value=\"{}\">\n",
    view.sort.column(),
    view.direction,
  ));

  out.push_str("<fieldset class=\"ranges\">\n");
  for field in SCORE_FIELDS {
    let range = view.filter.range(field);
    out.push_str(&format!(
      "<div><span>{field}</span>{}{}{}</div>\n",
      number_input(&field.to_string(), range.exact, "="),
      number_input(&format!("{field}_min"), range.min, "min"),
      number_input(&format!("{field}_max"), range.max, "max"),
    ));
  }
  out.push_str("</fieldset>\n<button type=\"submit\">Filter</button> \
                <a href=\"/\">Reset</a>\n</form>\n");
  out
}

const STYLE: &str = "
body { font-family: sans-serif; margin: 2rem; }
table { border-collapse: collapse; }
th, td { padding: .25rem .6rem; border-bottom: 1px solid #ddd; }
td.num { text-align: right; font-variant-numeric: tabular-nums; }
.ranges input { width: 5rem; }
.flash.success { background: #e6f4ea; padding: .5rem; }
.flash.warning { background: #fff4e5; padding: .5rem; }
.pager a, .pager span { margin-right: .6rem; }
";

const SCRIPT: &str = r"
const table = document.getElementById('table');
document.addEventListener('click', async (event) => {
  const button = event.target.closest('button.delete');
  if (!button) return;
  const res = await fetch('/delete/' + button.dataset.id, { method: 'POST' });
  if (res.ok) button.closest('tr').remove();
});
const form = document.getElementById('filters');
let timer;
form.addEventListener('input', () => {
  clearTimeout(timer);
  timer = setTimeout(async () => {
    const params = new URLSearchParams(new FormData(form));
    history.replaceState(null, '', '/?' + params);
    params.set('ajax', '1');
    const res = await fetch('/?' + params);
    if (res.ok) table.innerHTML = await res.text();
  }, 250);
});
";

/// The complete listing page.
pub fn page(view: &ListView<'_>) -> String {
  let flash = view
    .flash
    .map(|f| format!("<p class=\"flash {}\">{}</p>\n", f.level(), escape(&f.message())))
    .unwrap_or_default();
  let add_action = escape(&view.query.url("/add"));
  let export_href = escape(&view.query.without("page").url("/export.csv"));

  format!(
    "<!doctype html>
<html lang=\"el\">
<head>
<meta charset=\"utf-8\">
<title>psephos</title>
<style>{STYLE}</style>
</head>
<body>
<h1>psephos</h1>
{flash}<form class=\"add\" method=\"post\" action=\"{add_action}\">
<textarea name=\"words\" rows=\"2\" cols=\"60\" placeholder=\"words, separated by commas or spaces\"></textarea>
<button type=\"submit\">Add</button>
</form>
{filters}<p><a class=\"export\" href=\"{export_href}\">Export CSV</a></p>
<div id=\"table\">
{table}</div>
<script>{SCRIPT}</script>
</body>
</html>
",
    filters = filter_form(view),
    table = fragment(view),
  )
}
