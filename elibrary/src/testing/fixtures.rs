//! HTML fixtures shaped like catalog responses.

/// Search endpoint URL of the live catalog.
pub const SEARCH_URL: &str = "https://www.gsaelibrary.gsa.gov/ElibMain/searchResults.do";

/// Builds a search results page with one row per detail link.
///
/// Every page also carries navigation and schedule links that must never be
/// mistaken for detail links.
#[must_use]
pub fn search_results_html(detail_hrefs: &[&str]) -> String {
    let rows: String = detail_hrefs
        .iter()
        .enumerate()
        .map(|(i, href)| {
            format!(
                "      <tr>\n        <td><a href=\"{href}\">Contractor {n}</a></td>\n        \
                 <td><a href=\"scheduleSummary.do?scheduleNumber=MAS\">MAS</a></td>\n      </tr>\n",
                n = i + 1,
            )
        })
        .collect();

    format!(
        "<!DOCTYPE html>\n<html>\n  <head><title>GSA eLibrary - Search Results</title></head>\n  \
         <body>\n    <a href=\"/ElibMain/home.do\">Home</a>\n    \
         <a href=\"contractorList.do?contractorListFor=A\">Contractors A</a>\n    \
         <table class=\"results\">\n{rows}    </table>\n  </body>\n</html>\n"
    )
}

/// Builds a minimal contractor detail page.
#[must_use]
pub fn contractor_page_html(contractor_name: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n  <head><title>{contractor_name}</title></head>\n  \
         <body>\n    <h1>{contractor_name}</h1>\n    <table class=\"contract\"></table>\n  \
         </body>\n</html>\n"
    )
}
