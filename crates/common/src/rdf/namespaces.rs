pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const DCTERMS: &str = "http://purl.org/dc/terms/";
pub const FOAF: &str = "http://xmlns.com/foaf/0.1/";
pub const PIM: &str = "http://www.w3.org/ns/pim/space#";
pub const ACL: &str = "http://www.w3.org/ns/auth/acl#";
pub const SCHEMA: &str = "https://schema.org/";
pub const SCHEMA_HTTP: &str = "http://schema.org/";
pub const SIOC: &str = "http://rdfs.org/sioc/ns#";
pub const SSN: &str = "http://purl.oclc.org/NET/ssnx/ssn#";
pub const WALLET: &str = "https://w3id.org/identity-wallet/ns#";

/// Predicate and class IRIs used by the agents.
///
/// Classes carry a `class_` prefix so they don't collide with the
/// predicates of the same name (`foaf:img` vs `foaf:Image`).
#[derive(Debug, Clone, Copy)]
pub struct Predicates {
    pub title: &'static str,
    pub description: &'static str,
    pub r#type: &'static str,
    pub storage: &'static str,
    pub maker: &'static str,
    pub knows: &'static str,
    pub name: &'static str,
    pub image: &'static str,
    pub primary_topic: &'static str,
    pub is_related_to: &'static str,
    pub is_related_to_http: &'static str,
    pub passport: &'static str,
    pub container_of: &'static str,
    pub observes: &'static str,
    pub has_value: &'static str,

    pub class_document: &'static str,
    pub class_image: &'static str,
    pub class_person: &'static str,
    pub class_agent: &'static str,
    pub class_profile_document: &'static str,
    pub class_space: &'static str,
    pub class_sensor: &'static str,

    // access control
    pub auth: &'static str,
    pub access: &'static str,
    pub agent: &'static str,
    pub agent_class: &'static str,
    pub mode: &'static str,
    pub read: &'static str,
    pub write: &'static str,
    pub control: &'static str,
}

pub const PRED: Predicates = Predicates {
    title: "http://purl.org/dc/terms/title",
    description: "http://purl.org/dc/terms/description",
    r#type: "http://www.w3.org/1999/02/22-rdf-syntax-ns#type",
    storage: "http://www.w3.org/ns/pim/space#storage",
    maker: "http://xmlns.com/foaf/0.1/maker",
    knows: "http://xmlns.com/foaf/0.1/knows",
    name: "http://xmlns.com/foaf/0.1/name",
    image: "http://xmlns.com/foaf/0.1/img",
    primary_topic: "http://xmlns.com/foaf/0.1/primaryTopic",
    is_related_to: "https://schema.org/isRelatedTo",
    is_related_to_http: "http://schema.org/isRelatedTo",
    passport: "https://w3id.org/identity-wallet/ns#passport",
    container_of: "http://rdfs.org/sioc/ns#container_of",
    observes: "http://purl.oclc.org/NET/ssnx/ssn#observes",
    has_value: "http://purl.oclc.org/NET/ssnx/ssn#hasValue",

    class_document: "http://xmlns.com/foaf/0.1/Document",
    class_image: "http://xmlns.com/foaf/0.1/Image",
    class_person: "http://xmlns.com/foaf/0.1/Person",
    class_agent: "http://xmlns.com/foaf/0.1/Agent",
    class_profile_document: "http://xmlns.com/foaf/0.1/PersonalProfileDocument",
    class_space: "http://rdfs.org/sioc/ns#Space",
    class_sensor: "http://purl.oclc.org/NET/ssnx/ssn#Sensor",

    auth: "http://www.w3.org/ns/auth/acl#Authorization",
    access: "http://www.w3.org/ns/auth/acl#accessTo",
    agent: "http://www.w3.org/ns/auth/acl#agent",
    agent_class: "http://www.w3.org/ns/auth/acl#agentClass",
    mode: "http://www.w3.org/ns/auth/acl#mode",
    read: "http://www.w3.org/ns/auth/acl#Read",
    write: "http://www.w3.org/ns/auth/acl#Write",
    control: "http://www.w3.org/ns/auth/acl#Control",
};

impl Predicates {
    /// Predicates the graph assembler is allowed to follow
    pub fn links(&self) -> [&'static str; 4] {
        [
            self.knows,
            self.is_related_to,
            self.is_related_to_http,
            self.passport,
        ]
    }

    /// Shorten an IRI to `prefix:local` when it falls in a known namespace.
    pub fn compact(&self, iri: &str) -> String {
        for (prefix, ns) in self.prefixes() {
            if let Some(local) = iri.strip_prefix(ns) {
                if !local.is_empty() && !local.contains(['/', '#']) {
                    return format!("{}:{}", prefix, local);
                }
            }
        }
        iri.to_string()
    }

    pub fn prefixes(&self) -> [(&'static str, &'static str); 10] {
        [
            ("rdf", RDF),
            ("dc", DCTERMS),
            ("foaf", FOAF),
            ("pim", PIM),
            ("acl", ACL),
            ("schema", SCHEMA),
            ("schemahttp", SCHEMA_HTTP),
            ("sioc", SIOC),
            ("ssn", SSN),
            ("wallet", WALLET),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicates_live_in_their_namespaces() {
        for (prefix, ns) in PRED.prefixes() {
            assert!(ns.ends_with('#') || ns.ends_with('/'), "{prefix}");
        }
        assert!(PRED.title.starts_with(DCTERMS));
        assert!(PRED.knows.starts_with(FOAF));
        assert!(PRED.auth.starts_with(ACL));
        assert!(PRED.passport.starts_with(WALLET));
    }

    #[test]
    fn test_compact() {
        assert_eq!(PRED.compact(PRED.knows), "foaf:knows");
        assert_eq!(PRED.compact(PRED.is_related_to_http), "schemahttp:isRelatedTo");
        assert_eq!(
            PRED.compact("https://alice.example/profile/card#me"),
            "https://alice.example/profile/card#me"
        );
    }

    #[test]
    fn test_link_allow_list() {
        let links = PRED.links();
        assert!(links.contains(&PRED.knows));
        assert!(links.contains(&PRED.is_related_to_http));
        assert!(!links.contains(&PRED.maker));
        assert!(!links.contains(&PRED.storage));
    }
}
