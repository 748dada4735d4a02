/// Things an authenticated identity may be allowed to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Read the leadership dashboard (aggregate report)
    ViewDashboard,

    /// Work the ticket queue: view, update status, escalate
    WorkTickets,
}

impl Capability {
    pub fn describe(&self) -> &'static str {
        match self {
            Capability::ViewDashboard => "view the dashboard",
            Capability::WorkTickets => "work tickets",
        }
    }
}
