//! Role archetypes used to boost the skills score.
//!
//! Lookup is a substring match of the role name against the lower-cased job
//! title, first entry wins. Table order is therefore significant: specific
//! names sit above broader ones ("mern" before "full stack", "data engineer"
//! before "data scientist"). Editing names or skill lists changes stored scores.

#[derive(Debug)]
pub struct RoleProfile {
    pub name: &'static str,
    pub critical_skills: &'static [&'static str],
    pub important_skills: &'static [&'static str],
    pub boost: f64,
}

macro_rules! role {
    ($name:expr, [$($critical:expr),* $(,)?], [$($important:expr),* $(,)?], $boost:expr) => {
        RoleProfile {
            name: $name,
            critical_skills: &[$($critical),*],
            important_skills: &[$($important),*],
            boost: $boost,
        }
    };
}

pub static ROLE_PROFILES: &[RoleProfile] = &[
    role!("mern", ["mongodb", "express", "react", "node"], ["javascript", "html", "css", "redux", "typescript", "git", "rest api"], 30.0),
    role!("mean", ["mongodb", "express", "angular", "node"], ["typescript", "javascript", "html", "css", "rxjs", "git"], 30.0),
    role!("full stack", ["javascript", "react", "node", "sql"], ["html", "css", "typescript", "mongodb", "docker", "git", "rest api"], 25.0),
    role!("frontend", ["javascript", "html", "css", "react"], ["typescript", "redux", "webpack", "tailwind", "vue", "angular", "git"], 25.0),
    role!("front end", ["javascript", "html", "css", "react"], ["typescript", "redux", "webpack", "tailwind", "vue", "angular", "git"], 25.0),
    role!("react native", ["react native", "javascript", "react"], ["typescript", "redux", "android", "ios", "firebase"], 25.0),
    role!("react", ["react", "javascript", "html", "css"], ["redux", "typescript", "next.js", "jest", "git"], 25.0),
    role!("angular", ["angular", "typescript", "javascript", "html"], ["rxjs", "css", "ngrx", "jasmine", "git"], 25.0),
    role!("vue", ["vue", "javascript", "html", "css"], ["vuex", "nuxt", "typescript", "git"], 25.0),
    role!("node", ["node", "javascript", "express"], ["mongodb", "sql", "typescript", "rest api", "docker"], 25.0),
    role!("backend", ["sql", "rest api", "git"], ["docker", "redis", "aws", "microservices", "python", "java", "node"], 20.0),
    role!("back end", ["sql", "rest api", "git"], ["docker", "redis", "aws", "microservices", "python", "java", "node"], 20.0),
    role!("django", ["python", "django", "sql"], ["postgresql", "rest api", "celery", "docker", "git"], 25.0),
    role!("flask", ["python", "flask", "sql"], ["rest api", "docker", "postgresql", "git"], 25.0),
    role!("python", ["python"], ["django", "flask", "sql", "pandas", "rest api", "git"], 20.0),
    role!("spring", ["java", "spring", "sql"], ["hibernate", "microservices", "rest api", "maven", "docker"], 25.0),
    role!("java developer", ["java", "spring", "sql"], ["hibernate", "microservices", "maven", "rest api", "git"], 25.0),
    role!("java engineer", ["java", "spring", "sql"], ["hibernate", "microservices", "maven", "rest api", "git"], 25.0),
    role!(".net", ["c#", ".net", "sql"], ["asp.net", "azure", "entity framework", "rest api"], 25.0),
    role!("php", ["php", "mysql", "html"], ["laravel", "javascript", "css", "git"], 20.0),
    role!("laravel", ["php", "laravel", "mysql"], ["javascript", "vue", "rest api", "git"], 25.0),
    role!("ruby", ["ruby", "rails", "sql"], ["postgresql", "rspec", "redis", "git"], 25.0),
    role!("golang", ["golang", "rest api", "sql"], ["docker", "kubernetes", "microservices", "grpc"], 25.0),
    role!("go developer", ["golang", "rest api", "sql"], ["docker", "kubernetes", "microservices", "grpc"], 25.0),
    role!("rust", ["rust"], ["tokio", "c++", "linux", "docker", "git"], 25.0),
    role!("c++", ["c++"], ["linux", "algorithms", "data structures", "multithreading", "git"], 20.0),
    role!("embedded", ["c", "c++", "microcontroller"], ["rtos", "linux", "arm", "python"], 25.0),
    role!("android", ["android", "kotlin", "java"], ["firebase", "jetpack", "rest api", "git"], 25.0),
    role!("ios", ["swift", "ios", "xcode"], ["objective-c", "swiftui", "rest api", "git"], 25.0),
    role!("flutter", ["flutter", "dart"], ["firebase", "android", "ios", "rest api"], 25.0),
    role!("mobile", ["android", "ios"], ["kotlin", "swift", "flutter", "react native", "firebase"], 20.0),
    role!("devops", ["docker", "kubernetes", "linux", "ci/cd"], ["aws", "terraform", "jenkins", "ansible", "git", "python"], 25.0),
    role!("site reliability", ["linux", "kubernetes", "monitoring"], ["docker", "prometheus", "terraform", "python", "aws"], 25.0),
    role!("sre", ["linux", "kubernetes", "monitoring"], ["docker", "prometheus", "terraform", "python", "aws"], 25.0),
    role!("cloud", ["aws", "azure", "gcp"], ["terraform", "docker", "kubernetes", "linux", "networking"], 25.0),
    role!("data engineer", ["python", "sql", "spark"], ["airflow", "kafka", "aws", "hadoop", "etl", "scala"], 25.0),
    role!("data scientist", ["python", "machine learning", "statistics"], ["pandas", "numpy", "scikit-learn", "sql", "tensorflow", "deep learning"], 25.0),
    role!("data analyst", ["sql", "excel", "python"], ["tableau", "power bi", "statistics", "pandas"], 25.0),
    role!("machine learning", ["python", "machine learning", "tensorflow"], ["pytorch", "scikit-learn", "deep learning", "pandas", "numpy"], 25.0),
    role!("ml engineer", ["python", "machine learning", "tensorflow"], ["pytorch", "scikit-learn", "deep learning", "docker", "mlops"], 25.0),
    role!("ai engineer", ["python", "machine learning", "deep learning"], ["pytorch", "tensorflow", "nlp", "llm"], 25.0),
    role!("business analyst", ["excel", "sql", "requirements"], ["power bi", "tableau", "jira", "communication"], 20.0),
    role!("qa", ["testing", "selenium", "test cases"], ["automation", "java", "python", "jira", "api testing"], 20.0),
    role!("test engineer", ["testing", "selenium", "test cases"], ["automation", "java", "python", "jira", "api testing"], 20.0),
    role!("security", ["network security", "linux", "penetration testing"], ["python", "siem", "firewalls", "cryptography"], 25.0),
    role!("network engineer", ["networking", "tcp/ip", "routing"], ["cisco", "firewalls", "linux", "ccna"], 20.0),
    role!("database administrator", ["sql", "mysql", "postgresql"], ["oracle", "backup", "performance tuning", "linux"], 20.0),
    role!("ui/ux", ["figma", "wireframing", "prototyping"], ["adobe xd", "user research", "html", "css"], 20.0),
    role!("designer", ["figma", "photoshop", "illustrator"], ["adobe xd", "sketch", "typography"], 20.0),
    role!("product manager", ["product management", "roadmap", "agile"], ["jira", "analytics", "sql", "communication"], 20.0),
    role!("project manager", ["project management", "agile", "scrum"], ["jira", "risk management", "communication", "pmp"], 20.0),
    role!("software engineer", ["data structures", "algorithms", "git"], ["java", "python", "c++", "sql", "system design"], 15.0),
    role!("software developer", ["data structures", "algorithms", "git"], ["java", "python", "c++", "sql", "system design"], 15.0),
];

/// First role whose name appears in the job title.
pub fn find_role(title: &str) -> Option<&'static RoleProfile> {
    let title = title.to_lowercase();
    if title.trim().is_empty() {
        return None;
    }
    ROLE_PROFILES.iter().find(|role| title.contains(role.name))
}
