use sea_orm::{entity::prelude::*, ConnectionTrait, QueryFilter, Select, Set};
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "movies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub director: String,
    pub year: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { match *self {} }
}

impl ActiveModelBehavior for ActiveModel {}

/// Body of a create request. The legacy field names are accepted as aliases.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMovie {
    #[serde(alias = "titulo")]
    pub title: String,
    #[serde(alias = "diretor")]
    pub director: String,
    #[serde(alias = "ano")]
    pub year: i32,
}

impl NewMovie {
    pub fn validate(&self) -> Result<(), errors::ModelError> {
        validate_title(&self.title)?;
        validate_director(&self.director)?;
        Ok(())
    }
}

/// One field of a partial update: left out, sent as `null`, or sent with a value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Patch<T> {
    #[default]
    Absent,
    Null,
    Value(T),
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(|v| v.map_or(Patch::Null, Patch::Value))
    }
}

impl<T> Patch<T> {
    /// Columns are non-nullable, so an explicit `null` is rejected rather than
    /// read as "leave unchanged".
    fn resolve(self, field: &str) -> Result<Option<T>, errors::ModelError> {
        match self {
            Patch::Absent => Ok(None),
            Patch::Null => Err(errors::ModelError::Validation(format!("{field} cannot be null"))),
            Patch::Value(v) => Ok(Some(v)),
        }
    }
}

/// Body of an update request as received.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct MoviePatch {
    #[serde(default, alias = "titulo")]
    pub title: Patch<String>,
    #[serde(default, alias = "diretor")]
    pub director: Patch<String>,
    #[serde(default, alias = "ano")]
    pub year: Patch<i32>,
}

impl MoviePatch {
    pub fn validate(self) -> Result<MovieChanges, errors::ModelError> {
        let title = self.title.resolve("title")?;
        if let Some(t) = &title { validate_title(t)?; }
        let director = self.director.resolve("director")?;
        if let Some(d) = &director { validate_director(d)?; }
        let year = self.year.resolve("year")?;
        Ok(MovieChanges { title, director, year })
    }
}

/// Validated partial update; `None` means the column is left untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MovieChanges {
    pub title: Option<String>,
    pub director: Option<String>,
    pub year: Option<i32>,
}

impl MovieChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.director.is_none() && self.year.is_none()
    }

    pub fn apply_to(&self, am: &mut ActiveModel) {
        if let Some(t) = &self.title { am.title = Set(t.clone()); }
        if let Some(d) = &self.director { am.director = Set(d.clone()); }
        if let Some(y) = self.year { am.year = Set(y); }
    }

    /// Same merge as `apply_to`, for stores that keep plain models.
    pub fn apply_to_model(&self, m: &mut Model) {
        if let Some(t) = &self.title { m.title = t.clone(); }
        if let Some(d) = &self.director { m.director = d.clone(); }
        if let Some(y) = self.year { m.year = y; }
    }
}

/// Exact-match filter; an unset field adds no condition.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MovieFilter {
    pub title: Option<String>,
    pub year: Option<i32>,
}

impl MovieFilter {
    /// Build from raw query-string values. Empty values count as absent.
    pub fn from_query(title: Option<String>, year: Option<String>) -> Result<Self, errors::ModelError> {
        let title = title.filter(|t| !t.is_empty());
        let year = match year.as_deref().map(str::trim).filter(|y| !y.is_empty()) {
            Some(y) => Some(
                y.parse::<i32>()
                    .map_err(|_| errors::ModelError::Validation(format!("year must be an integer, got {y:?}")))?,
            ),
            None => None,
        };
        Ok(Self { title, year })
    }

    pub fn is_empty(&self) -> bool { self.title.is_none() && self.year.is_none() }

    pub fn apply(&self, mut select: Select<Entity>) -> Select<Entity> {
        if let Some(t) = &self.title {
            select = select.filter(Column::Title.eq(t.clone()));
        }
        if let Some(y) = self.year {
            select = select.filter(Column::Year.eq(y));
        }
        select
    }

    pub fn matches(&self, m: &Model) -> bool {
        self.title.as_ref().map_or(true, |t| *t == m.title) && self.year.map_or(true, |y| y == m.year)
    }
}

pub fn validate_title(t: &str) -> Result<(), errors::ModelError> {
    if t.trim().is_empty() {
        return Err(errors::ModelError::Validation("title required".into()));
    }
    Ok(())
}

pub fn validate_director(d: &str) -> Result<(), errors::ModelError> {
    if d.trim().is_empty() {
        return Err(errors::ModelError::Validation("director required".into()));
    }
    Ok(())
}

pub async fn create<C: ConnectionTrait>(db: &C, input: &NewMovie) -> Result<Model, errors::ModelError> {
    input.validate()?;
    let am = ActiveModel {
        title: Set(input.title.clone()),
        director: Set(input.director.clone()),
        year: Set(input.year),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}
