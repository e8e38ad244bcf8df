pub mod records;

pub use records::{
    BasicInfo, BasicInfoInput, Career, CareerInput, Education, EducationInput, Project,
    ProjectInput, RecordKind, Skill, SkillInput, SkillLevel,
};
