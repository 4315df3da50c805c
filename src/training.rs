//! Training lessons on cognitive defense.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    pub title: String,
    pub content: String,
    pub exercises: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingModule {
    pub name: String,
    pub description: String,
    pub lessons: Vec<Lesson>,
}

impl TrainingModule {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            lessons: Vec::new(),
        }
    }

    /// Content is stored trimmed.
    pub fn add_lesson(&mut self, title: impl Into<String>, content: &str) {
        self.lessons.push(Lesson {
            title: title.into(),
            content: content.trim().to_string(),
            exercises: Vec::new(),
        });
    }

    /// Attach an exercise to the lesson at `lesson_index`. Out-of-range
    /// indices are ignored and return false.
    pub fn add_exercise(&mut self, lesson_index: usize, exercise: impl Into<String>) -> bool {
        match self.lessons.get_mut(lesson_index) {
            Some(lesson) => {
                lesson.exercises.push(exercise.into());
                true
            }
            None => {
                warn!(
                    "No lesson at index {} in '{}', exercise dropped",
                    lesson_index, self.name
                );
                false
            }
        }
    }

    pub fn render(&self) -> String {
        let mut lines = vec![
            format!("Starting training: {}", self.name),
            format!("Description: {}", self.description),
        ];
        for (i, lesson) in self.lessons.iter().enumerate() {
            lines.push(format!("\nLesson {}: {}", i + 1, lesson.title));
            lines.push(lesson.content.clone());
            if !lesson.exercises.is_empty() {
                lines.push("\nExercises:".to_string());
                for (j, exercise) in lesson.exercises.iter().enumerate() {
                    lines.push(format!("  Exercise {}: {}", j + 1, exercise));
                }
            }
        }
        lines.join("\n")
    }

    /// Rendered session text; the caller decides where it goes.
    pub fn start(&self) -> String {
        info!(lessons = self.lessons.len(), "Starting training: {}", self.name);
        self.render()
    }
}

/// Fundamentals course: three lessons, one exercise each.
pub fn cognitive_defense_basics() -> TrainingModule {
    let mut training = TrainingModule::new(
        "Cognitive Defense Basics",
        "Learn the fundamentals of cognitive defense and protection against manipulation.",
    );

    training.add_lesson(
        "Introduction to Cognitive Defense",
        "Cognitive defense involves protecting your thought processes from manipulation and bias.
This includes recognizing manipulation tactics, understanding cognitive biases, and developing
critical thinking skills.",
    );
    training.add_lesson(
        "Common Manipulation Tactics",
        "Common manipulation tactics include:
- Emotional appeals and fear mongering
- Authority bias exploitation
- Social proof manipulation
- Scarcity and urgency creation
- Reciprocity pressure",
    );
    training.add_lesson(
        "Critical Thinking Techniques",
        "Effective critical thinking techniques include:
- Questioning assumptions
- Evaluating evidence quality
- Considering alternative explanations
- Checking logical consistency
- Identifying potential biases",
    );

    training.add_exercise(
        0,
        "Reflect on a recent situation where you felt pressured to make a decision.",
    );
    training.add_exercise(
        1,
        "Identify manipulation tactics in news headlines or advertisements.",
    );
    training.add_exercise(
        2,
        "Practice questioning assumptions in a statement you agree with.",
    );
    training
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basics_course_shape() {
        let course = cognitive_defense_basics();
        assert_eq!(course.lessons.len(), 3);
        assert!(course.lessons.iter().all(|l| l.exercises.len() == 1));
        assert_eq!(course.lessons[1].title, "Common Manipulation Tactics");
    }

    #[test]
    fn test_add_exercise_out_of_range() {
        let mut course = TrainingModule::new("Empty", "");
        assert!(!course.add_exercise(0, "nothing to attach to"));
        course.add_lesson("One", "  body\n");
        assert!(course.add_exercise(0, "attach"));
        assert!(!course.add_exercise(1, "too far"));
        assert_eq!(course.lessons[0].content, "body");
    }

    #[test]
    fn test_render_numbers_lessons_and_exercises() {
        let mut course = TrainingModule::new("Drill", "Short drill");
        course.add_lesson("First", "Read this.");
        course.add_lesson("Second", "And this.");
        course.add_exercise(1, "Do it");

        let expected = "Starting training: Drill\n\
                        Description: Short drill\n\
                        \n\
                        Lesson 1: First\n\
                        Read this.\n\
                        \n\
                        Lesson 2: Second\n\
                        And this.\n\
                        \n\
                        Exercises:\n  Exercise 1: Do it";
        assert_eq!(course.start(), expected);
    }
}
