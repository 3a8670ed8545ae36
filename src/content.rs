//! Page content - the fixed display data every section renders from.
//!
//! All lists are `'static` and never change for the life of the process.
//! Sections render exactly one element per entry, in list order.

// =============================================================================
// ICONS
// =============================================================================

/// The icon catalog. Icons are referenced by name and drawn as one glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    Braces,
    Code,
    Layout,
    PanelLeft,
    Server,
    Database,
    Terminal,
    Laptop,
    Mail,
    Phone,
    Github,
    Linkedin,
    ExternalLink,
    ArrowUp,
    ArrowRight,
}

impl Icon {
    /// All icons in the catalog.
    pub const ALL: [Icon; 15] = [
        Icon::Braces,
        Icon::Code,
        Icon::Layout,
        Icon::PanelLeft,
        Icon::Server,
        Icon::Database,
        Icon::Terminal,
        Icon::Laptop,
        Icon::Mail,
        Icon::Phone,
        Icon::Github,
        Icon::Linkedin,
        Icon::ExternalLink,
        Icon::ArrowUp,
        Icon::ArrowRight,
    ];

    /// Catalog name (kebab-case).
    pub fn name(self) -> &'static str {
        match self {
            Icon::Braces => "braces",
            Icon::Code => "code",
            Icon::Layout => "layout",
            Icon::PanelLeft => "panel-left",
            Icon::Server => "server",
            Icon::Database => "database",
            Icon::Terminal => "terminal",
            Icon::Laptop => "laptop",
            Icon::Mail => "mail",
            Icon::Phone => "phone",
            Icon::Github => "github",
            Icon::Linkedin => "linkedin",
            Icon::ExternalLink => "external-link",
            Icon::ArrowUp => "arrow-up",
            Icon::ArrowRight => "arrow-right",
        }
    }

    /// Look an icon up by catalog name.
    pub fn from_name(name: &str) -> Option<Icon> {
        Icon::ALL.into_iter().find(|icon| icon.name() == name)
    }

    /// Single-cell glyph used when painting.
    pub fn glyph(self) -> char {
        match self {
            Icon::Braces => '{',
            Icon::Code => '<',
            Icon::Layout => '▦',
            Icon::PanelLeft => '▌',
            Icon::Server => '≣',
            Icon::Database => '◍',
            Icon::Terminal => '$',
            Icon::Laptop => '▭',
            Icon::Mail => '✉',
            Icon::Phone => '☎',
            Icon::Github => '⌥',
            Icon::Linkedin => '⊞',
            Icon::ExternalLink => '↗',
            Icon::ArrowUp => '↑',
            Icon::ArrowRight => '→',
        }
    }
}

// =============================================================================
// ENTITIES
// =============================================================================

/// A way to get in touch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactMethod {
    pub icon: Icon,
    pub label: &'static str,
    pub value: &'static str,
    pub url: Option<&'static str>,
}

impl ContactMethod {
    /// External links open outside the page; `mailto:`/`tel:` do not.
    pub fn is_external(&self) -> bool {
        self.url.is_some_and(|url| url.starts_with("http"))
    }
}

/// A footer social link.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SocialLink {
    pub icon: Icon,
    pub url: &'static str,
    pub label: &'static str,
}

/// A featured project card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Project {
    pub title: &'static str,
    pub description: &'static str,
    pub image: &'static str,
    pub technologies: &'static [&'static str],
    pub github_url: &'static str,
    pub live_url: &'static str,
}

/// A skill card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TechSkill {
    pub name: &'static str,
    pub icon: Icon,
    /// Accent color as hex.
    pub color: &'static str,
}

/// A navbar entry pointing at a section anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavLink {
    pub href: &'static str,
    pub label: &'static str,
}

impl NavLink {
    /// Section id the link scrolls to (`#skills` → `skills`).
    pub fn target_id(&self) -> &'static str {
        self.href.trim_start_matches('#')
    }
}

// =============================================================================
// DATA
// =============================================================================

pub const OWNER_NAME: &str = "Rathin Bagchi";

pub const LOGO_TEXT: &str = "Rathin-Portfolio-WEB";

pub const NAV_LINKS: &[NavLink] = &[
    NavLink { href: "#home", label: "Home" },
    NavLink { href: "#skills", label: "Skills" },
    NavLink { href: "#projects", label: "Projects" },
    NavLink { href: "#about", label: "About" },
    NavLink { href: "#contact", label: "Contact" },
];

pub const HERO_TITLE: &str = "Hi, I'm Rathin Bagchi, a Web Developer crafting modern experiences.";

pub const HERO_SUBTITLE: &str = "Building beautiful, responsive and performance-focused web applications with attention to detail.";

pub const TECH_SKILLS: &[TechSkill] = &[
    TechSkill { name: "React", icon: Icon::Braces, color: "#61DAFB" },
    TechSkill { name: "JavaScript", icon: Icon::Code, color: "#F7DF1E" },
    TechSkill { name: "HTML", icon: Icon::Layout, color: "#E34F26" },
    TechSkill { name: "Next.js", icon: Icon::Layout, color: "#111111" },
    TechSkill { name: "CSS", icon: Icon::PanelLeft, color: "#1572B6" },
    TechSkill { name: "Node.js", icon: Icon::Server, color: "#339933" },
    TechSkill { name: "MongoDB", icon: Icon::Database, color: "#47A248" },
    TechSkill { name: "Git", icon: Icon::Terminal, color: "#F05032" },
    TechSkill { name: "Responsive Design", icon: Icon::Laptop, color: "#38B2AC" },
];

pub const SKILLS_BLURB: &str = "I'm constantly learning and adding new technologies to my toolkit. My approach combines technical expertise with a strong emphasis on clean code, performance, and user experience.";

pub const SKILL_TAGS: &[&str] = &["Front-End", "Back-End", "Responsive", "Performance", "Accessibility"];

pub const PROJECTS: &[Project] = &[
    Project {
        title: "Secure Signup and Login Web App with Next.js",
        description: "This is a secure and modern authentication web application built with Next.js (App Router). It features a seamless signup and login system with JWT-based authentication and bcrypt for password hashing. The app ensures user data protection while providing a smooth user experience.",
        image: "./public/authentication.png",
        technologies: &["Nextjs", "JWT", "bcrypt", "MongoDB"],
        github_url: "https://github.com/rathin182/Authentication",
        live_url: "https://authenticationa.netlify.app/",
    },
    Project {
        title: "ChessMate: Offline Chess Game",
        description: "Enjoy a classic game of chess anytime, anywhere with ChessMate, a simple and lightweight offline chess game. Play against the AI with different difficulty levels, improve your strategy, and sharpen your skills without needing an internet connection. Perfect for both beginners and experienced players!",
        image: "./public/chess.png",
        technologies: &["React", "javaScript", "Tailwind CSS"],
        github_url: "https://github.com/rathin182",
        live_url: "https://visionary-crisp-ae54a2.netlify.app/",
    },
];

pub const ALL_PROJECTS_URL: &str = "https://github.com/rathin182";

pub const ABOUT_PARAGRAPHS: &[&str] = &[
    "I'm a passionate developer constantly working on new projects and expanding my skills. My first completed project, ChessMate, is a simple and lightweight offline chess game where players can challenge AI opponents with varying difficulty levels. It's designed to help users improve their strategy without needing an internet connection.",
    "Right now, my projects are still in development, but I'm always ready to take on new opportunities. My first completed project is a small offline chess game, and many more are on the way! I'm eager to learn, grow, and collaborate on exciting projects. If you're looking for someone who's ready to take on challenges, let's connect!",
];

pub const RESUME_URL: &str = "https://github.com/rathin182/resume";

pub const ABOUT_BADGE_TITLE: &str = "fresher";

pub const ABOUT_BADGE_CAPTION: &str = "no Experience";

pub const CONTACT_METHODS: &[ContactMethod] = &[
    ContactMethod {
        icon: Icon::Mail,
        label: "Email",
        value: "rathinb745@gmail.com",
        url: Some("mailto:rathinb745@gmail.com"),
    },
    ContactMethod {
        icon: Icon::Phone,
        label: "Phone",
        value: "+91 (983) 662-8250",
        url: Some("tel:+919836628250"),
    },
    ContactMethod {
        icon: Icon::Github,
        label: "GitHub",
        value: "@rathin182",
        url: Some("https://github.com/rathin182"),
    },
    ContactMethod {
        icon: Icon::Linkedin,
        label: "LinkedIn",
        value: "Rathin Bagchi",
        url: Some("https://www.linkedin.com/in/rathin-bagchi-988b85244/"),
    },
];

pub const CONTACT_INTRO: &str = "Feel free to reach out for collaborations, opportunities, or just a friendly chat about web development and technology.";

pub const OPPORTUNITIES_TITLE: &str = "Open for Opportunities";

pub const OPPORTUNITIES_TEXT: &str = "Currently available for freelance projects, full-time positions, and interesting collaborations. Let's build something amazing together!";

pub const OPPORTUNITIES_URL: &str = "mailto:rathinb745@gmail.com";

pub const SOCIAL_LINKS: &[SocialLink] = &[
    SocialLink {
        icon: Icon::Github,
        url: "https://github.com/rathin182",
        label: "GitHub",
    },
    SocialLink {
        icon: Icon::Linkedin,
        url: "https://www.linkedin.com/in/rathin-bagchi-988b85244/",
        label: "LinkedIn",
    },
    SocialLink {
        icon: Icon::Mail,
        url: "mailto:rathinb745@gmail.com",
        label: "Email",
    },
];

pub const COPYRIGHT: &str = "© 2023-2025 Rathin Bagchi, Inc. Rathin Bagchi";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_catalog_round_trips_names() {
        for icon in Icon::ALL {
            assert_eq!(Icon::from_name(icon.name()), Some(icon));
        }
        assert_eq!(Icon::from_name("twitter"), None);
    }

    #[test]
    fn test_nav_targets() {
        let ids: Vec<_> = NAV_LINKS.iter().map(|l| l.target_id()).collect();
        assert_eq!(ids, ["home", "skills", "projects", "about", "contact"]);
    }

    #[test]
    fn test_skill_colors_parse() {
        for skill in TECH_SKILLS {
            assert!(crate::types::Rgba::from_hex(skill.color).is_some(), "{}", skill.name);
        }
    }

    #[test]
    fn test_contact_external() {
        assert!(!CONTACT_METHODS[0].is_external());
        assert!(!CONTACT_METHODS[1].is_external());
        assert!(CONTACT_METHODS[2].is_external());
    }
}
