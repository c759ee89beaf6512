mod detail;
mod list;

pub(super) use detail::DetailView;
pub(super) use list::ListView;
