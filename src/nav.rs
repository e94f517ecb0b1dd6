//! Navigation bar layout

use crate::routes::Route;

const BASE_CLASSES: &str = "flex items-center w-full py-10 justify-between rounded-lg transition-all ";
const POST_PAGE_CLASSES: &str = "sticky top-0 -mx-20";

/// CSS classes for the navigation bar. Off the index page the bar sticks to
/// the top and bleeds into the page margins.
pub fn nav_class(route: &Route) -> String {
    let mut classes = BASE_CLASSES.to_string();
    if !route.is_index() {
        classes.push_str(POST_PAGE_CLASSES);
    }
    classes
}
