//! Test data for Solid servers
//!
//! A [`Blueprint`] lists servers and the people living on them. The
//! [`SeedWriter`] turns it into the documents a fresh wallet account
//! expects, either as files laid out like LDP containers or PUT straight
//! into an [`LdpStore`]. Each person gets:
//!
//! ```text
//! {id}
//! ├── little-sister
//! │   ├── graph-comments/
//! │   ├── graph-nodes/
//! │   ├── inbox
//! │   └── sensor (optional)
//! └── profile
//!     └── card
//! ```
//!
//! Friendships are symmetric: listing a friend on one side is enough.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::ldp::{LdpError, LdpStore, TURTLE};
use crate::rdf::{Literal, RdfError, Term, Writer, PRED};

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid blueprint: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{person} lists unknown friend {friend}")]
    UnknownFriend { person: String, friend: String },
    #[error("person {0} appears more than once")]
    DuplicatePerson(String),
    #[error("{0:?} cannot be used as a directory name")]
    InvalidName(String),
    #[error("rdf error: {0}")]
    Rdf(#[from] RdfError),
    #[error("ldp error: {0}")]
    Ldp(#[from] LdpError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blueprint {
    pub servers: Vec<Server>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Server {
    pub name: String,
    /// Base URL people's containers hang off
    pub location: String,
    #[serde(default)]
    pub people: Vec<Person>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub friends: Vec<String>,
    #[serde(default)]
    pub sensor: bool,
}

impl Blueprint {
    pub fn from_json(json: &str) -> Result<Self, SeedError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, SeedError> {
        Self::from_json(&fs::read_to_string(path)?)
    }
}

/// One resource to be seeded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedDocument {
    /// Name of the server the document belongs to
    pub server: String,
    pub uri: String,
    /// Location below the server's container directory
    pub path: PathBuf,
    pub turtle: String,
}

pub struct SeedWriter {
    blueprint: Blueprint,
}

struct Resident<'a> {
    server: &'a Server,
    person: &'a Person,
}

impl Resident<'_> {
    fn base(&self) -> String {
        format!(
            "{}/{}",
            self.server.location.trim_end_matches('/'),
            self.person.id
        )
    }

    fn web_id(&self) -> String {
        format!("{}/profile/card#me", self.base())
    }
}

impl SeedWriter {
    pub fn new(blueprint: Blueprint) -> Self {
        Self { blueprint }
    }

    pub fn web_id(location: &str, id: &str) -> String {
        format!("{}/{}/profile/card#me", location.trim_end_matches('/'), id)
    }

    /// Every document described by the blueprint, with friendships made
    /// symmetric.
    pub fn documents(&self) -> Result<Vec<SeedDocument>, SeedError> {
        let mut residents: Vec<Resident<'_>> = Vec::new();
        let mut by_id: HashMap<&str, usize> = HashMap::new();
        for server in &self.blueprint.servers {
            check_name(&server.name)?;
            for person in &server.people {
                check_name(&person.id)?;
                if by_id.insert(&person.id, residents.len()).is_some() {
                    return Err(SeedError::DuplicatePerson(person.id.clone()));
                }
                residents.push(Resident { server, person });
            }
        }

        let mut friends: Vec<Vec<String>> = vec![Vec::new(); residents.len()];
        for (i, resident) in residents.iter().enumerate() {
            for friend_id in &resident.person.friends {
                let j = *by_id
                    .get(friend_id.as_str())
                    .ok_or_else(|| SeedError::UnknownFriend {
                        person: resident.person.id.clone(),
                        friend: friend_id.clone(),
                    })?;
                push_unique(&mut friends[i], residents[j].web_id());
                push_unique(&mut friends[j], resident.web_id());
            }
        }

        let mut documents = Vec::new();
        for (resident, friends) in residents.iter().zip(&friends) {
            documents.extend(person_documents(resident, friends)?);
        }
        Ok(documents)
    }

    /// Write the documents to disk, one `ldpc-{server}` directory per server
    /// unless `flatten` is set. Existing server directories are replaced.
    pub fn write_containers(&self, output_dir: &Path, flatten: bool) -> Result<usize, SeedError> {
        let documents = self.documents()?;

        for server in &self.blueprint.servers {
            let dir = container_dir(output_dir, &server.name, flatten);
            if !flatten && dir.exists() {
                fs::remove_dir_all(&dir)?;
            }
            fs::create_dir_all(&dir)?;
            tracing::info!("writing server {} to {}", server.location, dir.display());

            for person in &server.people {
                let app = dir.join(&person.id).join("little-sister");
                fs::create_dir_all(app.join("graph-comments"))?;
                fs::create_dir_all(app.join("graph-nodes"))?;
                fs::create_dir_all(dir.join(&person.id).join("profile"))?;
            }
        }

        for document in &documents {
            let path = container_dir(output_dir, &document.server, flatten).join(&document.path);
            tracing::debug!("writing {}", path.display());
            fs::write(path, &document.turtle)?;
        }
        Ok(documents.len())
    }

    /// PUT every document into `store`
    pub async fn publish<S: LdpStore + ?Sized>(&self, store: &S) -> Result<usize, SeedError> {
        let documents = self.documents()?;
        for document in &documents {
            store
                .put(&document.uri, Bytes::from(document.turtle.clone()), TURTLE)
                .await?;
        }
        tracing::info!("published {} seed documents", documents.len());
        Ok(documents.len())
    }
}

fn container_dir(output_dir: &Path, server: &str, flatten: bool) -> PathBuf {
    if flatten {
        output_dir.to_path_buf()
    } else {
        output_dir.join(format!("ldpc-{}", server))
    }
}

/// Names end up as single path components on disk
fn check_name(name: &str) -> Result<(), SeedError> {
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(SeedError::InvalidName(name.to_string()));
    }
    Ok(())
}

fn push_unique(list: &mut Vec<String>, value: String) {
    if !list.contains(&value) {
        list.push(value);
    }
}

fn person_documents(
    resident: &Resident<'_>,
    friends: &[String],
) -> Result<Vec<SeedDocument>, SeedError> {
    let person = resident.person;
    let base = resident.base();
    let web_id = Term::iri(resident.web_id());
    let mut documents = Vec::new();

    let mut add = |path: String, writer: &Writer| -> Result<(), SeedError> {
        documents.push(SeedDocument {
            server: resident.server.name.clone(),
            uri: format!("{}/{}", base, path),
            path: Path::new(&person.id).join(&path),
            turtle: writer.end()?,
        });
        Ok(())
    };

    // profile
    let card = Term::iri(format!("{}/profile/card", base));
    let mut profile = Writer::new();
    profile
        .add_triple(
            card.clone(),
            PRED.title,
            Literal::simple(format!("WebID profile of {}", person.name)),
        )
        .add_triple(card.clone(), PRED.r#type, PRED.class_profile_document)
        .add_triple(card.clone(), PRED.maker, web_id.clone())
        .add_triple(card, PRED.primary_topic, web_id.clone())
        .add_triple(web_id.clone(), PRED.r#type, PRED.class_person)
        .add_triple(web_id.clone(), PRED.name, Literal::simple(&person.name))
        .add_triple(
            web_id.clone(),
            PRED.description,
            Literal::simple(&person.description),
        );
    if person.sensor {
        profile.add_triple(
            web_id.clone(),
            PRED.container_of,
            Term::iri(format!("{}/little-sister/sensor#sensor", base)),
        );
    }
    for friend in friends {
        profile.add_triple(web_id.clone(), PRED.knows, Term::iri(friend));
    }
    add("profile/card".to_string(), &profile)?;

    // inbox
    let inbox_doc = Term::iri(format!("{}/little-sister/inbox", base));
    let mut inbox = Writer::new();
    inbox
        .add_triple(
            inbox_doc.clone(),
            PRED.title,
            Literal::simple(format!("Inbox of {}", person.name)),
        )
        .add_triple(inbox_doc.clone(), PRED.maker, web_id)
        .add_triple(
            inbox_doc,
            PRED.primary_topic,
            Term::iri(format!("{}/little-sister/inbox#inbox", base)),
        )
        .add_triple(
            Term::iri(format!("{}/little-sister/inbox#inbox", base)),
            PRED.r#type,
            PRED.class_space,
        );
    add("little-sister/inbox".to_string(), &inbox)?;

    if person.sensor {
        let sensor_doc = Term::iri(format!("{}/little-sister/sensor", base));
        let sensor = Term::iri(format!("{}/little-sister/sensor#sensor", base));
        let mut writer = Writer::new();
        writer
            .add_triple(sensor_doc.clone(), PRED.r#type, PRED.class_document)
            .add_triple(
                sensor_doc.clone(),
                PRED.title,
                Literal::simple("Sensor document"),
            )
            .add_triple(sensor_doc, PRED.primary_topic, sensor.clone())
            .add_triple(sensor.clone(), PRED.r#type, PRED.class_sensor)
            .add_triple(sensor.clone(), PRED.observes, Literal::simple("n/a"))
            .add_triple(sensor, PRED.has_value, Literal::simple("n/a"));
        add("little-sister/sensor".to_string(), &writer)?;
    }

    Ok(documents)
}
