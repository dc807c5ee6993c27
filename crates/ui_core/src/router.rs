//! Tab routing for the shells.

/// Icons used by the bottom navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Home,
    Calendar,
    Scissors,
    Users,
    Menu,
    Star,
}

/// One bottom-navigation entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub id: &'static str,
    pub icon: Icon,
    pub label: &'static str,
}

/// A closed set of sections one shell can show.
pub trait Section: Copy + Eq + 'static {
    const HOME: Self;

    /// Every section, in navigation order.
    fn all() -> &'static [Self];

    fn nav_item(self) -> NavItem;

    fn id(self) -> &'static str {
        self.nav_item().id
    }

    /// Section for a navigation identifier; unknown identifiers go home.
    fn from_id(id: &str) -> Self {
        Self::all()
            .iter()
            .copied()
            .find(|section| section.id() == id)
            .unwrap_or(Self::HOME)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdminSection {
    Home,
    Agenda,
    Services,
    Professionals,
    Menu,
}

impl AdminSection {
    /// Title of the "Em desenvolvimento..." panel for sections not built yet.
    pub fn placeholder_title(self) -> Option<&'static str> {
        match self {
            AdminSection::Agenda => Some("Agenda"),
            AdminSection::Services => Some("Serviços"),
            AdminSection::Professionals => Some("Profissionais"),
            AdminSection::Home | AdminSection::Menu => None,
        }
    }
}

impl Section for AdminSection {
    const HOME: Self = AdminSection::Home;

    fn all() -> &'static [Self] {
        &[
            AdminSection::Home,
            AdminSection::Agenda,
            AdminSection::Services,
            AdminSection::Professionals,
            AdminSection::Menu,
        ]
    }

    fn nav_item(self) -> NavItem {
        let (id, icon, label) = match self {
            AdminSection::Home => ("home", Icon::Home, "Início"),
            AdminSection::Agenda => ("agenda", Icon::Calendar, "Agenda"),
            AdminSection::Services => ("services", Icon::Scissors, "Serviços"),
            AdminSection::Professionals => ("professionals", Icon::Users, "Profissionais"),
            AdminSection::Menu => ("menu", Icon::Menu, "Menu"),
        };
        NavItem { id, icon, label }
    }
}

/// Entries of the admin menu, all placeholders for now.
pub const ADMIN_MENU_ENTRIES: [&str; 3] = [
    "Configurações do Estúdio",
    "Relatórios Financeiros",
    "Feedbacks dos Clientes",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientSection {
    Home,
    Booking,
    Appointments,
    Services,
    Professionals,
    About,
}

impl ClientSection {
    /// Only signed-in clients may open these.
    pub fn requires_auth(self) -> bool {
        matches!(self, ClientSection::Booking | ClientSection::Appointments)
    }

    pub fn placeholder_title(self) -> Option<&'static str> {
        match self {
            ClientSection::Booking => Some("Agendar Horário"),
            ClientSection::Appointments => Some("Meus Agendamentos"),
            _ => None,
        }
    }
}

impl Section for ClientSection {
    const HOME: Self = ClientSection::Home;

    fn all() -> &'static [Self] {
        &[
            ClientSection::Home,
            ClientSection::Booking,
            ClientSection::Appointments,
            ClientSection::Services,
            ClientSection::Professionals,
            ClientSection::About,
        ]
    }

    fn nav_item(self) -> NavItem {
        let (id, icon, label) = match self {
            ClientSection::Home => ("home", Icon::Home, "Início"),
            ClientSection::Booking => ("booking", Icon::Calendar, "Agendar"),
            ClientSection::Appointments => ("appointments", Icon::Calendar, "Meus Agendamentos"),
            ClientSection::Services => ("services", Icon::Scissors, "Serviços"),
            ClientSection::Professionals => ("professionals", Icon::Users, "Profissionais"),
            ClientSection::About => ("about", Icon::Star, "Sobre"),
        };
        NavItem { id, icon, label }
    }
}

/// What the client shell renders for the active section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outlet<S> {
    Render(S),
    /// Nothing is rendered; the auth flow must be requested instead
    RequireAuth,
}

/// Resolve the client section at render time.
pub fn client_outlet(section: ClientSection, is_client: bool) -> Outlet<ClientSection> {
    if section.requires_auth() && !is_client {
        Outlet::RequireAuth
    } else {
        Outlet::Render(section)
    }
}

/// The active section of one shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabRouter<S> {
    active: S,
}

impl<S: Section> Default for TabRouter<S> {
    fn default() -> Self {
        Self { active: S::HOME }
    }
}

impl<S: Section> TabRouter<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> S {
        self.active
    }

    /// Make `section` active. Returns false when it already was.
    pub fn select(&mut self, section: S) -> bool {
        if self.active == section {
            return false;
        }
        self.active = section;
        true
    }

    /// Select by navigation identifier.
    pub fn select_id(&mut self, id: &str) -> bool {
        self.select(S::from_id(id))
    }

    /// Back to home, e.g. after signing out.
    pub fn reset(&mut self) {
        self.active = S::HOME;
    }

    pub fn nav_items(&self) -> impl Iterator<Item = (NavItem, bool)> + '_ {
        S::all()
            .iter()
            .map(move |section| (section.nav_item(), *section == self.active))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_router_starts_at_home() {
        assert_eq!(TabRouter::<AdminSection>::new().active(), AdminSection::Home);
        assert_eq!(TabRouter::<ClientSection>::new().active(), ClientSection::Home);
    }

    #[test]
    fn test_select_is_idempotent() {
        let mut router = TabRouter::<ClientSection>::new();

        assert!(router.select(ClientSection::Services));
        assert!(!router.select(ClientSection::Services));
        assert_eq!(router.active(), ClientSection::Services);
    }

    #[test]
    fn test_unknown_id_falls_back_to_home() {
        let mut router = TabRouter::<AdminSection>::new();
        router.select(AdminSection::Menu);

        assert!(router.select_id("reports"));
        assert_eq!(router.active(), AdminSection::Home);
    }

    #[test]
    fn test_nav_sets_per_role() {
        let admin: Vec<_> = TabRouter::<AdminSection>::new()
            .nav_items()
            .map(|(item, _)| (item.id, item.label))
            .collect();
        assert_eq!(
            admin,
            vec![
                ("home", "Início"),
                ("agenda", "Agenda"),
                ("services", "Serviços"),
                ("professionals", "Profissionais"),
                ("menu", "Menu"),
            ]
        );

        let client: Vec<_> = ClientSection::all().iter().map(|s| s.nav_item().icon).collect();
        assert_eq!(
            client,
            vec![
                Icon::Home,
                Icon::Calendar,
                Icon::Calendar,
                Icon::Scissors,
                Icon::Users,
                Icon::Star
            ]
        );
    }

    #[test]
    fn test_active_item_is_marked() {
        let mut router = TabRouter::<ClientSection>::new();
        router.select_id("about");

        let active: Vec<_> = router
            .nav_items()
            .filter(|(_, active)| *active)
            .map(|(item, _)| item.id)
            .collect();

        assert_eq!(active, vec!["about"]);
    }

    #[test]
    fn test_gated_sections_require_client() {
        assert_eq!(client_outlet(ClientSection::Booking, false), Outlet::RequireAuth);
        assert_eq!(client_outlet(ClientSection::Appointments, false), Outlet::RequireAuth);
        assert_eq!(
            client_outlet(ClientSection::Booking, true),
            Outlet::Render(ClientSection::Booking)
        );
        assert_eq!(
            client_outlet(ClientSection::Services, false),
            Outlet::Render(ClientSection::Services)
        );
    }

    #[test]
    fn test_reset_returns_home() {
        let mut router = TabRouter::<AdminSection>::new();
        router.select(AdminSection::Agenda);

        router.reset();

        assert_eq!(router.active(), AdminSection::Home);
    }
}
