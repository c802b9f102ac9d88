//! 互动测验进度 - 展示层
//!
//! ## 职责
//! - 维护答题进度: 当前题号、已选选项、得分
//! - 选项一经选定即锁定，并立即判分
//! - 支持重新测验（同一套题，进度清零）

use crate::models::Quiz;
use crate::models::QuizQuestion;

/// 当前题目的作答状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerState {
    /// 尚未选择
    Unanswered,
    /// 选中了正确选项
    Correct,
    /// 选中了错误选项
    Incorrect,
}

/// 一轮测验的进度
///
/// 只管答题进度的推进与判分，题目怎么渲染由调用方决定。
pub struct QuizSession {
    quiz: Quiz,
    current_index: usize,
    selected_option: Option<usize>,
    score: usize,
    finished: bool,
}

impl QuizSession {
    pub fn new(quiz: Quiz) -> Self {
        // 空测验没有可答的题，直接视为完成
        let finished = quiz.questions.is_empty();
        Self {
            quiz,
            current_index: 0,
            selected_option: None,
            score: 0,
            finished,
        }
    }

    /// 测验标题
    pub fn title(&self) -> &str {
        &self.quiz.title
    }

    /// 当前题目，测验完成后为 None
    pub fn current_question(&self) -> Option<&QuizQuestion> {
        if self.finished {
            return None;
        }
        self.quiz.questions.get(self.current_index)
    }

    /// 进度指示: (当前题号, 总题数)，题号从 1 开始
    pub fn position(&self) -> (usize, usize) {
        (self.current_index + 1, self.total())
    }

    /// 总题数
    pub fn total(&self) -> usize {
        self.quiz.questions.len()
    }

    /// 当前得分
    pub fn score(&self) -> usize {
        self.score
    }

    /// 是否已答完全部题目
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// 当前题目已选中的选项下标
    pub fn selected_option(&self) -> Option<usize> {
        self.selected_option
    }

    /// 当前题目的作答状态
    pub fn answer_state(&self) -> AnswerState {
        let (selected, question) = match (self.selected_option, self.current_question()) {
            (Some(s), Some(q)) => (s, q),
            _ => return AnswerState::Unanswered,
        };

        if selected == question.answer_index {
            AnswerState::Correct
        } else {
            AnswerState::Incorrect
        }
    }

    /// 选择当前题目的一个选项
    ///
    /// 答对立即加一分。选项一经选定即锁定，
    /// 后续的选择一律不生效。
    ///
    /// # 返回
    /// 本次选择是否被采纳
    pub fn select_option(&mut self, option_index: usize) -> bool {
        let question = match self.current_question() {
            Some(q) => q,
            None => return false,
        };

        // 已锁定或下标越界
        if self.selected_option.is_some() || option_index >= question.options.len() {
            return false;
        }

        let correct = option_index == question.answer_index;
        self.selected_option = Some(option_index);
        if correct {
            self.score += 1;
        }

        true
    }

    /// 进入下一题
    ///
    /// 当前题未作答时不生效。最后一题作答后进入完成态。
    ///
    /// # 返回
    /// 是否发生了推进
    pub fn advance(&mut self) -> bool {
        if self.finished || self.selected_option.is_none() {
            return false;
        }

        if self.current_index + 1 >= self.total() {
            self.finished = true;
        } else {
            self.current_index += 1;
            self.selected_option = None;
        }

        true
    }

    /// 重新测验
    ///
    /// 题目不变，进度与得分清零。
    pub fn restart(&mut self) {
        self.current_index = 0;
        self.selected_option = None;
        self.score = 0;
        self.finished = self.quiz.questions.is_empty();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::quiz::sample_quiz;
    use crate::models::QUESTION_COUNT;

    // sample_quiz 的第 i 题答案是 i % 4

    #[test]
    fn test_new_session_starts_at_first_question() {
        let session = QuizSession::new(sample_quiz());

        assert_eq!(session.position(), (1, QUESTION_COUNT));
        assert_eq!(session.score(), 0);
        assert!(!session.is_finished());
        assert_eq!(session.answer_state(), AnswerState::Unanswered);
        assert_eq!(
            session.current_question().map(|q| q.question.as_str()),
            Some("Question 1?")
        );
    }

    #[test]
    fn test_correct_selection_scores_immediately() {
        let mut session = QuizSession::new(sample_quiz());

        assert!(session.select_option(0));
        assert_eq!(session.answer_state(), AnswerState::Correct);
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn test_incorrect_selection_reveals_without_scoring() {
        let mut session = QuizSession::new(sample_quiz());

        assert!(session.select_option(2));
        assert_eq!(session.answer_state(), AnswerState::Incorrect);
        assert_eq!(session.score(), 0);
        // 正确答案仍可从题目里读到，供展示时标出
        assert_eq!(session.current_question().map(|q| q.answer_index), Some(0));
    }

    #[test]
    fn test_selection_locks_after_first_answer() {
        let mut session = QuizSession::new(sample_quiz());

        assert!(session.select_option(2));
        // 之后不论选对选错都不再生效
        assert!(!session.select_option(0));
        assert_eq!(session.selected_option(), Some(2));
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_out_of_range_selection_is_rejected() {
        let mut session = QuizSession::new(sample_quiz());

        assert!(!session.select_option(4));
        assert_eq!(session.answer_state(), AnswerState::Unanswered);
        assert!(session.select_option(0));
    }

    #[test]
    fn test_advance_requires_an_answer() {
        let mut session = QuizSession::new(sample_quiz());

        assert!(!session.advance());
        assert_eq!(session.position(), (1, QUESTION_COUNT));

        session.select_option(0);
        assert!(session.advance());
        assert_eq!(session.position(), (2, QUESTION_COUNT));
        // 新题回到未作答状态
        assert_eq!(session.answer_state(), AnswerState::Unanswered);
        assert_eq!(session.selected_option(), None);
    }

    #[test]
    fn test_full_run_finishes_with_final_score() {
        let mut session = QuizSession::new(sample_quiz());

        // 全部答对: 第 i 题的答案是 i % 4
        for i in 0..QUESTION_COUNT {
            assert!(session.select_option(i % 4));
            assert!(session.advance());
        }

        assert!(session.is_finished());
        assert_eq!(session.score(), QUESTION_COUNT);
        assert!(session.current_question().is_none());
        // 完成后既不能作答也不能推进
        assert!(!session.select_option(0));
        assert!(!session.advance());
    }

    #[test]
    fn test_alternating_answers_score_half() {
        let mut session = QuizSession::new(sample_quiz());

        // 奇数题答对、偶数题答错，最终 5/10
        for i in 0..QUESTION_COUNT {
            let choice = if i % 2 == 0 { i % 4 } else { (i + 1) % 4 };
            assert!(session.select_option(choice));
            assert!(session.advance());
        }

        assert!(session.is_finished());
        assert_eq!(session.score(), QUESTION_COUNT / 2);
    }

    #[test]
    fn test_restart_clears_progress_but_keeps_questions() {
        let mut session = QuizSession::new(sample_quiz());

        session.select_option(0);
        session.advance();
        session.select_option(3);

        session.restart();

        assert_eq!(session.position(), (1, QUESTION_COUNT));
        assert_eq!(session.score(), 0);
        assert!(!session.is_finished());
        assert_eq!(session.answer_state(), AnswerState::Unanswered);
        assert_eq!(
            session.current_question().map(|q| q.question.as_str()),
            Some("Question 1?")
        );
    }

    #[test]
    fn test_restart_after_finish_allows_a_new_run() {
        let mut session = QuizSession::new(sample_quiz());

        for _ in 0..QUESTION_COUNT {
            session.select_option(1);
            session.advance();
        }
        assert!(session.is_finished());

        session.restart();
        assert!(!session.is_finished());
        assert!(session.select_option(0));
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn test_empty_quiz_is_finished_from_the_start() {
        let session = QuizSession::new(Quiz {
            title: "Empty".to_string(),
            questions: vec![],
        });

        assert!(session.is_finished());
        assert!(session.current_question().is_none());
    }
}
