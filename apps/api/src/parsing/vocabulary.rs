//! Fixed keyword vocabularies. Stored scores depend on these lists; keep them stable.

/// Technology names matched as whole words anywhere in a resume.
pub const KNOWN_TECHNOLOGIES: &[&str] = &[
    "javascript",
    "typescript",
    "python",
    "java",
    "c++",
    "c#",
    "golang",
    "rust",
    "ruby",
    "php",
    "swift",
    "kotlin",
    "react",
    "angular",
    "vue",
    "node.js",
    "nodejs",
    "express",
    "django",
    "flask",
    "spring",
    "html",
    "css",
    "sql",
    "mysql",
    "postgresql",
    "mongodb",
    "redis",
    "aws",
    "azure",
    "gcp",
    "docker",
    "kubernetes",
    "git",
    "linux",
    "graphql",
    "rest api",
    "machine learning",
    "tensorflow",
    "pandas",
];

pub const CERTIFICATION_KEYWORDS: &[&str] = &[
    "certified",
    "certification",
    "certificate",
    "aws certified",
    "azure certified",
    "google certified",
    "microsoft certified",
    "oracle certified",
    "pmp",
    "scrum master",
    "cissp",
    "ccna",
    "ccnp",
    "comptia",
    "cisco",
    "red hat",
    "rhce",
    "itil",
    "six sigma",
    "togaf",
    "cka",
    "coursera",
    "udemy",
    "nptel",
];

pub const PROJECT_KEYWORDS: &[&str] = &[
    "project",
    "projects",
    "developed",
    "built",
    "implemented",
    "designed",
    "created",
    "deployed",
    "github",
    "portfolio",
    "application",
    "website",
    "system",
    "platform",
    "capstone",
    "hackathon",
    "prototype",
    "open source",
];

pub const ACHIEVEMENT_KEYWORDS: &[&str] = &[
    "award",
    "awarded",
    "winner",
    "won",
    "first place",
    "rank",
    "ranked",
    "topper",
    "gold medal",
    "scholarship",
    "recognition",
    "honor",
    "dean's list",
    "achievement",
    "distinction",
    "merit",
    "published",
];

pub const INTERNSHIP_KEYWORDS: &[&str] = &[
    "intern",
    "internship",
    "summer intern",
    "trainee",
    "apprentice",
    "apprenticeship",
    "industrial training",
    "co-op",
    "fellowship",
];

/// Header lines that open a skills section.
pub const SKILL_SECTION_HEADERS: &[&str] = &["skills", "technical skills", "core competencies"];

/// Header lines that close a skills section.
pub const SECTION_STOP_HEADERS: &[&str] = &[
    "education",
    "experience",
    "work experience",
    "professional experience",
    "projects",
];

/// Line markers that rule a line out as the candidate's name.
pub const CONTACT_MARKERS: &[&str] = &[
    "@",
    "phone",
    "email",
    "resume",
    "curriculum vitae",
    "tel:",
    "mobile:",
];
